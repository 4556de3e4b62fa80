//! # libsuffix
//!
//! String indexing and approximate matching over sequences of generic
//! elements, built on a common radix-tree substrate.
//!
//! Three indexing flavors share one arena-backed compressed trie:
//!
//! - [`WordTree`](tree::WordTree) indexes whole sequences with O(|w|)
//!   insertion and supports exact, prefix, and approximate search.
//! - [`SuffixTree`](tree::SuffixTree) indexes every suffix of every
//!   inserted sequence in linear time (Ukkonen's online construction with
//!   suffix links) and answers matching-statistics queries in O(|q|).
//! - [`KernelSuffixTree`](tree::KernelSuffixTree) decorates a suffix tree
//!   with leaf-weight sums so the all-substrings kernel of
//!
//!   > Vishwanathan, S.V.N., and Alexander J. Smola. "Fast kernels for
//!   > string and tree matching." Kernel Methods in Computational Biology
//!   > (2004): 113-130.
//!
//!   is evaluable in O(|q|) after a single preprocessing pass.
//!
//! Approximate search and standalone edit-distance queries run on a
//! band-pruned dynamic-programming column engine in the [`edit`] module.
//!
//! ## Example
//!
//! ```rust
//! use libsuffix::prelude::*;
//!
//! let mut tree: WordTree<char, ()> = WordTree::new();
//! for word in ["kitten$", "sitting$"] {
//!     tree.add_word(&word.chars().collect::<Vec<_>>(), ());
//! }
//!
//! let query: Vec<char> = "kittin$".chars().collect();
//! let matches = tree.approximate_search(&query, 1.0, standard_distance);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(tree.radix().matched_word(&matches[0]),
//!            "kitten$".chars().collect::<Vec<_>>());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edit;
pub mod error;
pub mod tree;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::edit::{
        edit_distance, get_edit_commands, standard_distance, EditColumn, EditCommand, EditMatrix,
    };
    pub use crate::error::TreeError;
    pub use crate::tree::{
        Branch, BranchId, ExpWeight, ItemStorage, ItemStore, KernelData, KernelPayload,
        KernelProcessor, KernelSuffixTree, MatchEntry, Node, NullProcessor, RadixTree,
        SearchResult, StorageProcessor, SuffixTree, SumWeight, WeightFunction, Weighted,
        WordItemProcessor, WordTree,
    };
}
