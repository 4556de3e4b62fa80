//! Radix-tree indexing structures.
//!
//! All three index flavors share the arena-backed [`RadixTree`] substrate:
//!
//! | Structure | Insertion policy | Typical query |
//! |---|---|---|
//! | [`WordTree`] | whole sequences | exact / prefix / approximate search |
//! | [`SuffixTree`] | every suffix (Ukkonen) | matching statistics, substring lookup |
//! | [`KernelSuffixTree`] | every suffix + leaf weights | all-substrings kernel |
//!
//! Branches live in a `Vec` arena and reference each other by
//! [`BranchId`]; parent back-references and suffix links are plain
//! indices, so the cyclic link structure of a suffix tree (the root links
//! to itself) never fights the ownership model. Edge labels are
//! `(source, start, length)` slices into `Arc<[C]>` buffers shared by
//! every branch cut from the same inserted sequence.
//!
//! Insertion hooks are [`WordItemProcessor`] strategies: storage trees
//! append per-word items to branch payloads, kernel trees accumulate leaf
//! weights, and the default [`NullProcessor`] does nothing.

mod branch;
mod kernel;
mod processor;
mod radix;
mod suffix;
mod word;

pub use branch::{Branch, BranchId};
pub use kernel::{ExpWeight, KernelSuffixTree, SumWeight, WeightFunction};
pub use processor::{
    ItemStorage, ItemStore, KernelData, KernelPayload, KernelProcessor, NullProcessor,
    StorageProcessor, Weighted, WordItemProcessor,
};
pub use radix::{RadixTree, SearchResult};
pub use suffix::{MatchEntry, Node, SuffixTree};
pub use word::WordTree;
