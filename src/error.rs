//! Error types for tree mutation operations.

use thiserror::Error;

/// Errors produced by structural mutations of a radix tree.
///
/// Lookups that find nothing return `Option::None` or empty collections;
/// only mutations that would corrupt the tree surface an error. Malformed
/// offsets and indices are programming errors and panic instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A sibling with the same leading character is already attached.
    ///
    /// Radix-tree children are keyed by the first character of their edge
    /// label, so two siblings can never share one.
    #[error("a sibling with the same leading character already exists")]
    DuplicateChild,

    /// The branch has an empty label and cannot be attached.
    ///
    /// Only the root carries a zero-length label.
    #[error("cannot attach a branch with an empty label")]
    EmptyLabel,
}

/// A specialized `Result` type for tree mutations.
pub type Result<T> = std::result::Result<T, TreeError>;
