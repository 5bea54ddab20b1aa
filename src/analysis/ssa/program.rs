//! Whole-program SSA conversion.
//!
//! Functions share no mutable state during conversion, so
//! [`convert_program_parallel`] runs them on the rayon thread pool without any
//! coordination. Both entry points return the functions in input order.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    analysis::cfg::ControlFlowGraph,
    config::SsaConfig,
    ir::{Function, Program},
    Result,
};

/// Converts one function to SSA form and reassembles it.
///
/// # Errors
///
/// Returns any error from building the function's CFG or converting it.
pub fn convert_function(function: &Function, config: &SsaConfig) -> Result<Function> {
    let mut cfg = ControlFlowGraph::with_config(function, config.cfg)?;
    cfg.convert_to_ssa(config)?;
    Ok(cfg.into_function())
}

/// Converts every function of a program to SSA form, one after another.
///
/// # Errors
///
/// Returns the first error encountered, in function order.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::{
///     analysis::ssa::convert_program,
///     ir::{Function, Instruction, Program, Type},
///     SsaConfig,
/// };
///
/// let program = Program::new([Function::new("main").with_instrs([
///     Instruction::constant("v", Type::primitive("int"), 1),
///     Instruction::effect("print", ["v"]),
/// ])]);
///
/// let ssa = convert_program(&program, &SsaConfig::default())?;
/// assert_eq!(
///     ssa.to_string(),
///     "@main {\n.bb1:\n  v.0: int = const 1;\n  print v.0;\n  ret;\n}\n"
/// );
/// # Ok::<(), bril_ssa::Error>(())
/// ```
pub fn convert_program(program: &Program, config: &SsaConfig) -> Result<Program> {
    let functions = program
        .functions
        .iter()
        .map(|function| convert_function(function, config))
        .collect::<Result<Vec<_>>>()?;
    debug!(functions = functions.len(), "converted program to SSA");
    Ok(Program::new(functions))
}

/// Converts every function of a program to SSA form in parallel.
///
/// Produces the same program as [`convert_program`].
///
/// # Errors
///
/// Returns an error from one of the failing functions; which one is unspecified when
/// several fail.
pub fn convert_program_parallel(program: &Program, config: &SsaConfig) -> Result<Program> {
    let functions = program
        .functions
        .par_iter()
        .map(|function| convert_function(function, config))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        functions = functions.len(),
        threads = rayon::current_num_threads(),
        "converted program to SSA in parallel"
    );
    Ok(Program::new(functions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ir::{Code, Instruction, Type},
        Error,
    };

    fn counter(name: &str) -> Function {
        let int = Type::primitive("int");
        Function::new(name).with_instrs([
            Instruction::constant("i", int.clone(), 0).into(),
            Code::label("loop"),
            Instruction::value("add", "i", int, ["i", "i"]).into(),
            Instruction::jmp("loop").into(),
        ])
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let program = Program::new((0..16).map(|n| counter(&format!("f{n}"))));
        let config = SsaConfig::default();

        let sequential = convert_program(&program, &config).unwrap();
        let parallel = convert_program_parallel(&program, &config).unwrap();

        assert_eq!(sequential, parallel);
        let names: Vec<&str> = parallel.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "f0");
        assert_eq!(names[15], "f15");
    }

    #[test]
    fn test_convert_function_keeps_signature() {
        let function = counter("main").with_return_type(Type::primitive("int"));
        let converted = convert_function(&function, &SsaConfig::default()).unwrap();

        assert_eq!(converted.name, "main");
        assert_eq!(converted.return_type, Some(Type::primitive("int")));
        assert!(converted
            .instructions()
            .any(|instruction| instruction.op == "phi"));
    }

    #[test]
    fn test_convert_program_reports_errors() {
        let broken = Function::new("broken").with_instrs([Instruction::jmp("nowhere")]);
        let program = Program::new([counter("ok"), broken]);

        let err = convert_program(&program, &SsaConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownBlock { .. }));
        assert!(convert_program_parallel(&program, &SsaConfig::default()).is_err());
    }
}
