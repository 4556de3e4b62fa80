//! Insertion hooks and the payload capability traits they rely on.
//!
//! A [`WordItemProcessor`] is invoked whenever an insertion assigns a word
//! item to a branch: once per stored word in a [`WordTree`](crate::tree::WordTree),
//! once per suffix in a [`SuffixTree`](crate::tree::SuffixTree). It is a
//! strategy with a single method, not a hierarchy: pick one of the stock
//! implementations or write your own.

/// Per-word payloads that expose a scalar weight, as required by kernel
/// trees.
pub trait Weighted {
    /// The weight this item contributes to every suffix leaf of its word.
    fn weight(&self) -> f64;
}

impl Weighted for f64 {
    #[inline]
    fn weight(&self) -> f64 {
        *self
    }
}

/// Branch payloads that can accumulate word items, as required by
/// [`StorageProcessor`].
pub trait ItemStore<D> {
    /// Append one word item to this branch's collection.
    fn add_word_item(&mut self, item: D);
}

/// Branch payloads that carry kernel-preprocessing state, as required by
/// [`KernelProcessor`] and `KernelSuffixTree`.
pub trait KernelPayload {
    /// Sum of the weights of all word items on leaves below this branch.
    fn descendant_leaves_sum(&self) -> f64;
    /// Overwrite the descendant leaf sum.
    fn set_descendant_leaves_sum(&mut self, value: f64);
    /// The branch's accumulated kernel weight.
    fn weight(&self) -> f64;
    /// Overwrite the accumulated kernel weight.
    fn set_weight(&mut self, value: f64);
}

/// A branch payload that stores every word item assigned to the branch.
#[derive(Debug, Clone)]
pub struct ItemStorage<D> {
    /// The items assigned so far, in insertion order.
    pub items: Vec<D>,
}

impl<D> Default for ItemStorage<D> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<D> ItemStore<D> for ItemStorage<D> {
    fn add_word_item(&mut self, item: D) {
        self.items.push(item);
    }
}

/// The branch payload used by kernel suffix trees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KernelData {
    /// Sum of the weights of all word items on leaves below this branch.
    pub descendant_leaves_sum: f64,
    /// Accumulated kernel weight along the root path (after preprocessing).
    pub weight: f64,
}

impl KernelPayload for KernelData {
    #[inline]
    fn descendant_leaves_sum(&self) -> f64 {
        self.descendant_leaves_sum
    }

    #[inline]
    fn set_descendant_leaves_sum(&mut self, value: f64) {
        self.descendant_leaves_sum = value;
    }

    #[inline]
    fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    fn set_weight(&mut self, value: f64) {
        self.weight = value;
    }
}

/// Hook invoked whenever the tree assigns a word item to a branch.
pub trait WordItemProcessor<C, D, N> {
    /// React to `item` (belonging to `word`) being assigned to a branch
    /// whose payload is `data`.
    fn on_word_add(&self, word: &[C], item: &D, data: &mut N);
}

/// The default hook: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProcessor;

impl<C, D, N> WordItemProcessor<C, D, N> for NullProcessor {
    #[inline]
    fn on_word_add(&self, _word: &[C], _item: &D, _data: &mut N) {}
}

/// Appends each word item to the branch payload's item collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageProcessor;

impl<C, D, N> WordItemProcessor<C, D, N> for StorageProcessor
where
    D: Clone,
    N: ItemStore<D>,
{
    fn on_word_add(&self, _word: &[C], item: &D, data: &mut N) {
        data.add_word_item(item.clone());
    }
}

/// Accumulates each word item's weight into the branch payload's
/// descendant leaf sum; the insertion hook of kernel suffix trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelProcessor;

impl<C, D, N> WordItemProcessor<C, D, N> for KernelProcessor
where
    D: Weighted,
    N: KernelPayload,
{
    fn on_word_add(&self, _word: &[C], item: &D, data: &mut N) {
        data.set_descendant_leaves_sum(data.descendant_leaves_sum() + item.weight());
    }
}
