//! Whole-word radix tree.

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::tree::processor::{NullProcessor, WordItemProcessor};
use crate::tree::radix::{RadixTree, SearchResult};

/// A radix tree whose insertion policy indexes whole sequences.
///
/// Insertion is O(|w|): descend along existing labels, split at the
/// divergence point, attach one leaf. The word item is handed to the
/// processor at the branch where the word ends, so inserting the same
/// sequence twice appends through the processor rather than duplicating
/// structure.
#[derive(Debug, Clone)]
pub struct WordTree<C, D, N = (), P = NullProcessor> {
    radix: RadixTree<C, N>,
    processor: P,
    _item: PhantomData<D>,
}

impl<C, D, N> WordTree<C, D, N, NullProcessor>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    /// An empty word tree with the no-op insertion hook.
    pub fn new() -> Self {
        Self::with_processor(NullProcessor)
    }
}

impl<C, D, N> Default for WordTree<C, D, N, NullProcessor>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, D, N, P> WordTree<C, D, N, P>
where
    C: Clone + Eq + Hash,
    N: Default,
    P: WordItemProcessor<C, D, N>,
{
    /// An empty word tree with a custom insertion hook.
    pub fn with_processor(processor: P) -> Self {
        Self {
            radix: RadixTree::new(),
            processor,
            _item: PhantomData,
        }
    }

    /// The underlying radix tree, for traversals and match reconstruction.
    pub fn radix(&self) -> &RadixTree<C, N> {
        &self.radix
    }

    /// Drop every stored sequence.
    pub fn clear(&mut self) {
        self.radix.clear();
    }

    /// Store `word` and hand `item` to the processor at the branch where
    /// the word ends.
    ///
    /// # Panics
    ///
    /// Panics on an empty `word`; there is no branch for it to live on.
    pub fn add_word(&mut self, word: &[C], item: D) {
        assert!(!word.is_empty(), "cannot index an empty sequence");
        let (branch, offset, consumed) = self.radix.descend(word, 0, self.radix.root());
        let target = if consumed == word.len() {
            // The word is already a path; materialize its end if implicit.
            if offset < self.radix.branch(branch).length() {
                self.radix.split(branch, offset)
            } else {
                branch
            }
        } else {
            let parent = if offset < self.radix.branch(branch).length() {
                self.radix.split(branch, offset)
            } else {
                branch
            };
            let source: Arc<[C]> = Arc::from(word);
            let leaf = self
                .radix
                .new_branch(source, consumed, word.len() - consumed, 0);
            self.radix.attach_child(parent, leaf);
            leaf
        };
        self.processor
            .on_word_add(word, &item, self.radix.branch_mut(target).node_data_mut());
    }

    /// See [`RadixTree::exact_search`].
    pub fn exact_search(&self, word: &[C]) -> Option<SearchResult> {
        self.radix.exact_search(word)
    }

    /// See [`RadixTree::exact_prefix_search`].
    pub fn exact_prefix_search(&self, word: &[C]) -> Vec<SearchResult> {
        self.radix.exact_prefix_search(word)
    }

    /// See [`RadixTree::approximate_search`].
    pub fn approximate_search<F>(
        &self,
        word: &[C],
        max_distance: f64,
        distance_fn: F,
    ) -> Vec<SearchResult>
    where
        F: Fn(&C, &C) -> f64,
    {
        self.radix.approximate_search(word, max_distance, distance_fn)
    }

    /// See [`RadixTree::longest_common_prefix`], starting at the root.
    pub fn longest_common_prefix(&self, word: &[C], from_index: usize) -> SearchResult {
        self.radix
            .longest_common_prefix(word, from_index, self.radix.root())
    }

    /// The branch a search result refers to, reconstructed as a sequence.
    pub fn matched_word(&self, result: &SearchResult) -> Vec<C> {
        self.radix.matched_word(result)
    }
}
