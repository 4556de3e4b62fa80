//! Banded edit-distance engine.
//!
//! The engine computes Levenshtein-style distances column by column over a
//! sparse band: each [`EditColumn`] stores only the contiguous run of cells
//! whose value stays within the caller's `max_distance` (and optionally
//! within a diagonal margin), with +∞ implied everywhere else. Columns that
//! lose every cell signal that the whole computation can stop early, which
//! is what lets tree search prune entire subtrees.
//!
//! [`EditMatrix`] stacks columns for whole-string queries and recovers an
//! edit script via traceback.
//!
//! # Example
//!
//! ```rust
//! use libsuffix::edit::{edit_distance, standard_distance};
//!
//! let kitten: Vec<char> = "kitten".chars().collect();
//! let sitting: Vec<char> = "sitting".chars().collect();
//! assert_eq!(edit_distance(&kitten, &sitting, standard_distance), 3.0);
//! ```

mod column;
mod matrix;

pub use column::EditColumn;
pub use matrix::{get_edit_commands, EditCommand, EditMatrix};

/// The standard 0/1 replacement cost: `0.0` when the elements compare
/// equal, `1.0` otherwise.
#[inline]
pub fn standard_distance<C: PartialEq>(a: &C, b: &C) -> f64 {
    if a == b {
        0.0
    } else {
        1.0
    }
}

/// Compute the full edit distance between two sequences under a
/// caller-supplied replacement cost.
///
/// Insertions and deletions cost 1; replacements cost
/// `distance_fn(source_char, target_char)`.
pub fn edit_distance<C, F>(source: &[C], target: &[C], distance_fn: F) -> f64
where
    F: Fn(&C, &C) -> f64,
{
    EditMatrix::from_edit_distance(source, target, f64::INFINITY, distance_fn).distance()
}
