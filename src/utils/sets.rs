//! Set and relation helpers shared by the analyses.
//!
//! All helpers work on ordered containers ([`BTreeSet`] / [`BTreeMap`]) so that every
//! analysis result iterates in a deterministic order regardless of how it was built.

use std::collections::{BTreeMap, BTreeSet};

/// A binary relation from keys to sets of keys, e.g. block → successors.
pub type Relation<K = String> = BTreeMap<K, BTreeSet<K>>;

/// Intersects any number of sets.
///
/// Returns the empty set when no sets are given.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::utils::sets::intersect;
///
/// let a: BTreeSet<_> = [1, 2, 3].into();
/// let b: BTreeSet<_> = [2, 3, 4].into();
/// assert_eq!(intersect([&a, &b]), BTreeSet::from([2, 3]));
/// ```
pub fn intersect<'a, T, I>(sets: I) -> BTreeSet<T>
where
    T: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a BTreeSet<T>>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return BTreeSet::new();
    };

    let mut result = first.clone();
    for set in sets {
        result.retain(|item| set.contains(item));
        if result.is_empty() {
            break;
        }
    }
    result
}

/// Applies `f` to every member, collecting the images into a new set.
pub fn map<T, U, F>(set: &BTreeSet<T>, f: F) -> BTreeSet<U>
where
    U: Ord,
    F: FnMut(&T) -> U,
{
    set.iter().map(f).collect()
}

/// Keeps the members for which `predicate` holds.
pub fn filter<T, F>(set: &BTreeSet<T>, mut predicate: F) -> BTreeSet<T>
where
    T: Ord + Clone,
    F: FnMut(&T) -> bool,
{
    set.iter().filter(|item| predicate(*item)).cloned().collect()
}

/// Returns `true` if both sets hold exactly the same members.
#[must_use]
pub fn equal<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    a == b
}

/// Inverts a relation: `b ∈ result[a]` iff `a ∈ relation[b]`.
///
/// Every key of the input relation is also a key of the result, mapped to the
/// empty set if nothing relates to it.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::utils::sets::{invert, Relation};
///
/// let mut relation: Relation<&str> = Relation::new();
/// relation.insert("a", ["b", "c"].into());
///
/// let inverted = invert(&relation);
/// assert_eq!(inverted["b"], BTreeSet::from(["a"]));
/// assert_eq!(inverted["c"], BTreeSet::from(["a"]));
/// assert!(inverted["a"].is_empty());
/// ```
pub fn invert<K>(relation: &Relation<K>) -> Relation<K>
where
    K: Ord + Clone,
{
    let mut result: Relation<K> = relation
        .keys()
        .map(|key| (key.clone(), BTreeSet::new()))
        .collect();
    for (key, values) in relation {
        for value in values {
            result.entry(value.clone()).or_default().insert(key.clone());
        }
    }
    result
}

/// Composes a relation with another: `c ∈ result[a]` iff some `b` has
/// `b ∈ first[a]` and `c ∈ second[b]`.
///
/// Keys missing from `second` contribute nothing.
pub fn compose<K>(first: &Relation<K>, second: &Relation<K>) -> Relation<K>
where
    K: Ord + Clone,
{
    first
        .iter()
        .map(|(key, middles)| {
            let reached = middles
                .iter()
                .filter_map(|middle| second.get(middle))
                .flatten()
                .cloned()
                .collect();
            (key.clone(), reached)
        })
        .collect()
}
