//! Helpers shared by the integration tests.

#![allow(dead_code)]

use bril_ssa::{analysis::Block, ir::Program};

/// Loads one of the JSON programs under `tests/samples`.
pub fn sample(name: &str) -> Program {
    let json = match name {
        "loop" => include_str!("../samples/loop.json"),
        "abs" => include_str!("../samples/abs.json"),
        "reentry" => include_str!("../samples/reentry.json"),
        other => panic!("no sample named {other}"),
    };
    serde_json::from_str(json).expect("sample is valid Bril JSON")
}

/// Every sample program, by name.
pub fn all_samples() -> Vec<(&'static str, Program)> {
    ["loop", "abs", "reentry"]
        .into_iter()
        .map(|name| (name, sample(name)))
        .collect()
}

/// Renders a block body one instruction per entry.
pub fn text(block: &Block) -> Vec<String> {
    block.instrs.iter().map(ToString::to_string).collect()
}
