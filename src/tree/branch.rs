//! Arena-allocated branches.

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Index of a branch inside its tree's arena.
pub type BranchId = usize;

/// The arena slot that always holds the root.
pub(crate) const ROOT: BranchId = 0;

/// A node of the radix tree together with the labeled edge leading to it
/// from its parent.
///
/// The label is the slice `source[start .. start + length]`; only the root
/// has `length == 0`. `word_start` remembers where the full inserted
/// sequence begins inside `source`, so a match ending at offset `k` inside
/// this branch reconstructs as `source[word_start .. start + k]`.
///
/// Children are keyed by the first element of their label; the suffix link
/// and the parent back-reference are arena indices and carry no ownership.
#[derive(Debug, Clone)]
pub struct Branch<C, N> {
    pub(crate) source: Arc<[C]>,
    pub(crate) start: usize,
    pub(crate) length: usize,
    pub(crate) word_start: usize,
    pub(crate) children: FxHashMap<C, BranchId>,
    pub(crate) parent: Option<BranchId>,
    pub(crate) suffix_link: BranchId,
    pub(crate) node_data: N,
}

impl<C, N> Branch<C, N> {
    /// A fresh root: empty label, no parent, suffix link to itself.
    pub(crate) fn root(node_data: N) -> Self {
        Self {
            source: Arc::from(Vec::new()),
            start: 0,
            length: 0,
            word_start: 0,
            children: FxHashMap::default(),
            parent: None,
            suffix_link: ROOT,
            node_data,
        }
    }

    pub(crate) fn new(
        source: Arc<[C]>,
        start: usize,
        length: usize,
        word_start: usize,
        node_data: N,
    ) -> Self {
        debug_assert!(word_start <= start);
        debug_assert!(start + length <= source.len());
        Self {
            source,
            start,
            length,
            word_start,
            children: FxHashMap::default(),
            parent: None,
            suffix_link: ROOT,
            node_data,
        }
    }

    /// The shared sequence buffer this branch's label is cut from.
    pub fn source(&self) -> &Arc<[C]> {
        &self.source
    }

    /// Label start inside [`source`](Branch::source).
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Label length; zero only for the root.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Index in `source` where the full inserted sequence begins.
    #[inline]
    pub fn word_start(&self) -> usize {
        self.word_start
    }

    /// The edge label as a slice.
    pub fn label(&self) -> &[C] {
        &self.source[self.start..self.start + self.length]
    }

    /// The label element at `offset` (must be `< length`).
    #[inline]
    pub fn char_at(&self, offset: usize) -> &C {
        &self.source[self.start + offset]
    }

    /// The parent branch, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    /// The branch this one's suffix link points to.
    #[inline]
    pub fn suffix_link(&self) -> BranchId {
        self.suffix_link
    }

    /// Whether this branch has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Read-only access to the per-branch payload.
    #[inline]
    pub fn node_data(&self) -> &N {
        &self.node_data
    }

    /// Mutable access to the per-branch payload.
    #[inline]
    pub fn node_data_mut(&mut self) -> &mut N {
        &mut self.node_data
    }
}

impl<C: Eq + Hash, N> Branch<C, N> {
    /// The child whose label starts with `first`, if any.
    pub fn child(&self, first: &C) -> Option<BranchId> {
        self.children.get(first).copied()
    }
}
