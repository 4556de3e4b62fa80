//! All-substrings kernel evaluation over a preprocessed suffix tree.
//!
//! The kernel between a query `q` and the indexed weighted set `T` is
//!
//! ```text
//! K(q, T) = Σ_{s ∈ T} weight(s) · Σ_{u substring of q} Σ_{u occurs in s} w(|u|)
//! ```
//!
//! where `w` is a per-length substring weight. A single pass decorates
//! every branch with the weighted number of suffix leaves below it and a
//! path-accumulated weight; each matching-statistics entry of the query
//! then contributes one accumulated term and one partial-branch term, so
//! evaluation is O(|q|).

use std::hash::Hash;

use parking_lot::Mutex;

use crate::tree::processor::{KernelData, KernelPayload, KernelProcessor, Weighted, WordItemProcessor};
use crate::tree::suffix::SuffixTree;

/// A per-length substring weight, pre-telescoped: `compute_weight(s, e)`
/// returns `Σ_{len = s}^{e − 1} w(len)` in O(1).
///
/// Implementations must be non-negative and side-effect free.
pub trait WeightFunction {
    /// The telescoped sum of weights for substring lengths `start_len`
    /// (inclusive) through `end_len` (exclusive).
    fn compute_weight(&self, start_len: usize, end_len: usize) -> f64;
}

/// Uniform weight `w(len) = 1`: the kernel counts co-occurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumWeight;

impl WeightFunction for SumWeight {
    #[inline]
    fn compute_weight(&self, start_len: usize, end_len: usize) -> f64 {
        (end_len - start_len) as f64
    }
}

/// Geometric weight `w(len) = λ^len`, damping long substrings for
/// `λ < 1`. Within `1e-6` of `λ = 1` this degrades to [`SumWeight`] to
/// dodge the removable singularity in the closed form.
#[derive(Debug, Clone, Copy)]
pub struct ExpWeight {
    lambda: f64,
}

impl ExpWeight {
    /// A geometric weight with the given base.
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }
}

impl WeightFunction for ExpWeight {
    fn compute_weight(&self, start_len: usize, end_len: usize) -> f64 {
        if (self.lambda - 1.0).abs() < 1e-6 {
            (end_len - start_len) as f64
        } else {
            (self.lambda.powi(start_len as i32) - self.lambda.powi(end_len as i32))
                / (1.0 - self.lambda)
        }
    }
}

/// A suffix tree extended with the preprocessing pass and query evaluation
/// for the all-substrings kernel.
///
/// Word items carry weights ([`Weighted`]); the [`KernelProcessor`] folds
/// them into leaf payloads at insertion time. Preprocessing is lazy,
/// idempotent, and guarded by a mutex so concurrent callers cannot both
/// run the passes; any mutation invalidates it.
#[derive(Debug)]
pub struct KernelSuffixTree<C, D, W, N = KernelData, P = KernelProcessor> {
    suffix: SuffixTree<C, D, N, P>,
    weight_fn: W,
    preprocessed: bool,
    guard: Mutex<()>,
}

impl<C, D, W> KernelSuffixTree<C, D, W, KernelData, KernelProcessor>
where
    C: Clone + Eq + Hash,
    D: Weighted,
    W: WeightFunction,
{
    /// An empty kernel tree over the given weight function, using the
    /// stock kernel payload and insertion hook.
    pub fn new(weight_fn: W) -> Self {
        Self::with_processor(weight_fn, KernelProcessor)
    }
}

impl<C, D, W, N, P> KernelSuffixTree<C, D, W, N, P>
where
    C: Clone + Eq + Hash,
    W: WeightFunction,
    N: Default + KernelPayload,
    P: WordItemProcessor<C, D, N>,
{
    /// An empty kernel tree with a custom payload type and insertion hook.
    pub fn with_processor(weight_fn: W, processor: P) -> Self {
        Self {
            suffix: SuffixTree::with_processor(processor),
            weight_fn,
            preprocessed: false,
            guard: Mutex::new(()),
        }
    }

    /// The underlying suffix tree.
    pub fn suffix_tree(&self) -> &SuffixTree<C, D, N, P> {
        &self.suffix
    }

    /// Index every suffix of `word` with the given item. Invalidates any
    /// previous preprocessing.
    pub fn add_word(&mut self, word: &[C], item: D) {
        self.preprocessed = false;
        self.suffix.add_word(word, item);
    }

    /// Drop every indexed sequence. Invalidates any previous
    /// preprocessing.
    pub fn clear(&mut self) {
        self.preprocessed = false;
        self.suffix.clear();
    }

    /// Run the two decoration passes unless they already ran since the
    /// last mutation.
    ///
    /// Post-order: every branch learns the weighted number of suffix
    /// leaves below it and its own weight contribution
    /// `descendant_leaves_sum · compute_weight(start_len, end_len)`, where
    /// the label covers prefix lengths `start_len..end_len` of its word.
    /// Pre-order: weight contributions accumulate from the root so each
    /// branch ends up carrying the total weight of its root path.
    pub fn preprocess(&mut self) {
        let _guard = self.guard.lock();
        if self.preprocessed {
            return;
        }
        let weight_fn = &self.weight_fn;
        let radix = self.suffix.radix_mut();
        let root = radix.root();
        radix.post_order_process(root, &mut |branch, child_sums: Vec<f64>| {
            let sum = if branch.is_leaf() {
                branch.node_data().descendant_leaves_sum()
            } else {
                child_sums.into_iter().sum()
            };
            let start_len = branch.start() - branch.word_start() + 1;
            let end_len = start_len + branch.length();
            let weight = sum * weight_fn.compute_weight(start_len, end_len);
            let data = branch.node_data_mut();
            data.set_descendant_leaves_sum(sum);
            data.set_weight(weight);
            sum
        });
        radix.pre_order_process(root, &0.0f64, &mut |branch, accumulated: &f64| {
            let total = accumulated + branch.node_data().weight();
            branch.node_data_mut().set_weight(total);
            total
        });
        self.preprocessed = true;
    }

    /// Evaluate the kernel between `query` and the indexed set,
    /// preprocessing first if needed. O(|query|) once preprocessed.
    pub fn compute_kernel(&mut self, query: &[C]) -> f64 {
        self.preprocess();
        let mut total = 0.0;
        for entry in self.suffix.get_matching_statistics(query) {
            if entry.length == 0 {
                continue;
            }
            let end_len = entry.length + 1;
            let start_len = end_len - entry.node.offset;
            let radix = self.suffix.radix();
            let accumulated = radix.branch(entry.floor.branch).node_data().weight();
            let below = radix
                .branch(entry.ceil.branch)
                .node_data()
                .descendant_leaves_sum();
            total += accumulated + below * self.weight_fn.compute_weight(start_len, end_len);
        }
        total
    }
}
