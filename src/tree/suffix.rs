//! Generalized suffix tree with Ukkonen's online construction.
//!
//! Every call to [`SuffixTree::add_word`] inserts all suffixes of one
//! sequence in amortized linear time. Callers append a sentinel element
//! unique to each sequence so every suffix ends at an explicit leaf; a
//! sentinel shared between sequences is also legal and makes equal
//! suffixes share their leaf (the insertion hook then fires once per
//! owning sequence).
//!
//! Positions in the tree, explicit nodes and implicit positions inside a
//! label alike, are represented by [`Node`]. The suffix-link walk over
//! positions powers both construction and the matching-statistics query,
//! which reports, for every suffix of a query, the longest prefix of that
//! suffix occurring anywhere in the indexed set.

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::tree::branch::{BranchId, ROOT};
use crate::tree::processor::{NullProcessor, WordItemProcessor};
use crate::tree::radix::{RadixTree, SearchResult};

/// A position in the suffix tree: the point `offset` elements into the
/// label of `branch`.
///
/// The position is explicit when `offset == branch.length` and implicit
/// when it falls strictly inside the label. Positions are normalized so
/// that `offset == 0` occurs only at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// The branch whose label contains the position.
    pub branch: BranchId,
    /// Elements of the branch label consumed so far.
    pub offset: usize,
}

/// One matching-statistics entry: the longest prefix of the query suffix
/// starting at `start` that occurs in the tree.
#[derive(Debug, Clone, Copy)]
pub struct MatchEntry {
    /// Start index of the suffix inside the query.
    pub start: usize,
    /// Length of the longest matched prefix (0 when nothing matches).
    pub length: usize,
    /// The position realizing the match.
    pub node: Node,
    /// Nearest explicit node strictly above the match position.
    pub floor: Node,
    /// The explicit node at the far end of the match position's branch.
    pub ceil: Node,
}

/// A radix tree whose insertion policy indexes every suffix of every
/// inserted sequence.
///
/// `P` is the [`WordItemProcessor`] invoked once per suffix leaf (or, for
/// suffixes already present, once per observed position) with the
/// inserted item.
#[derive(Debug, Clone)]
pub struct SuffixTree<C, D, N = (), P = NullProcessor> {
    radix: RadixTree<C, N>,
    processor: P,
    _item: PhantomData<D>,
}

impl<C, D, N> SuffixTree<C, D, N, NullProcessor>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    /// An empty suffix tree with the no-op insertion hook.
    pub fn new() -> Self {
        Self::with_processor(NullProcessor)
    }
}

impl<C, D, N> Default for SuffixTree<C, D, N, NullProcessor>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, D, N, P> SuffixTree<C, D, N, P>
where
    C: Clone + Eq + Hash,
    N: Default,
    P: WordItemProcessor<C, D, N>,
{
    /// An empty suffix tree with a custom insertion hook.
    pub fn with_processor(processor: P) -> Self {
        Self {
            radix: RadixTree::new(),
            processor,
            _item: PhantomData,
        }
    }

    /// The underlying radix tree, for searches and traversals.
    pub fn radix(&self) -> &RadixTree<C, N> {
        &self.radix
    }

    pub(crate) fn radix_mut(&mut self) -> &mut RadixTree<C, N> {
        &mut self.radix
    }

    /// Drop every indexed sequence.
    pub fn clear(&mut self) {
        self.radix.clear();
    }

    /// The deepest position matching a prefix of `word`, starting from the
    /// root. Delegates to the radix substrate.
    pub fn longest_common_prefix(&self, word: &[C]) -> SearchResult {
        self.radix.longest_common_prefix(word, 0, ROOT)
    }

    /// The root position.
    #[inline]
    pub fn root_node(&self) -> Node {
        Node {
            branch: ROOT,
            offset: 0,
        }
    }

    /// Move one element deeper from `node`, if the tree continues with
    /// `c` there.
    ///
    /// At an explicit position this looks up the child starting with `c`;
    /// inside a label it compares `c` against the next label element.
    pub fn try_advance(&self, node: Node, c: &C) -> Option<Node> {
        let branch = self.radix.branch(node.branch);
        if node.offset == branch.length() {
            let child = branch.child(c)?;
            Some(Node {
                branch: child,
                offset: 1,
            })
        } else if branch.char_at(node.offset) == c {
            Some(Node {
                branch: node.branch,
                offset: node.offset + 1,
            })
        } else {
            None
        }
    }

    /// The position reached by dropping the first element of the path to
    /// `node`, or `None` at the root.
    ///
    /// Computed through the nearest explicit parent: follow the parent's
    /// suffix link (dropping the leading element when the parent is the
    /// root) and scan back down by segment skips. The scanned path always
    /// exists by the construction invariant, and the route stays correct
    /// even while links created in the current phase are provisional.
    pub fn follow_link(&self, node: Node) -> Option<Node> {
        if node.branch == ROOT {
            return None;
        }
        let branch = self.radix.branch(node.branch);
        debug_assert!(node.offset >= 1 && node.offset <= branch.length());
        let parent = branch
            .parent()
            .expect("a non-root branch always has a parent");
        let source = branch.source().clone();
        let low = branch.start();
        let high = branch.start() + node.offset;
        if parent == ROOT {
            Some(self.scan_down(ROOT, &source, low + 1, high))
        } else {
            let bridge = self.radix.branch(parent).suffix_link();
            Some(self.scan_down(bridge, &source, low, high))
        }
    }

    /// Nearest explicit node strictly above `node`: the far end of the
    /// parent branch (the root maps to itself).
    pub fn floor(&self, node: Node) -> Node {
        match self.radix.branch(node.branch).parent() {
            Some(parent) => Node {
                branch: parent,
                offset: self.radix.branch(parent).length(),
            },
            None => self.root_node(),
        }
    }

    /// The explicit node at or below `node`: the far end of its branch.
    pub fn ceil(&self, node: Node) -> Node {
        Node {
            branch: node.branch,
            offset: self.radix.branch(node.branch).length(),
        }
    }

    /// Walk down from the explicit node `from` along `source[low..high]`,
    /// skipping whole segments by their first element.
    fn scan_down(&self, from: BranchId, source: &Arc<[C]>, mut low: usize, high: usize) -> Node {
        let mut at = from;
        loop {
            if low == high {
                return Node {
                    branch: at,
                    offset: self.radix.branch(at).length(),
                };
            }
            let Some(child) = self.radix.branch(at).child(&source[low]) else {
                unreachable!("suffix-link scan left the tree");
            };
            let child_length = self.radix.branch(child).length();
            let remaining = high - low;
            if child_length >= remaining {
                return Node {
                    branch: child,
                    offset: remaining,
                };
            }
            low += child_length;
            at = child;
        }
    }

    /// Attach `leaf` at the position `at`, splitting first when the
    /// position is implicit. Returns the explicit node the leaf hangs off
    /// and whether a split materialized it just now.
    fn add_branch(&mut self, at: Node, leaf: BranchId) -> (Node, bool) {
        if at.offset < self.radix.branch(at.branch).length() {
            let upper = self.radix.split(at.branch, at.offset);
            self.radix.attach_child(upper, leaf);
            (
                Node {
                    branch: upper,
                    offset: at.offset,
                },
                true,
            )
        } else {
            self.radix.attach_child(at.branch, leaf);
            (at, false)
        }
    }

    /// Insert every suffix of `word`, invoking the processor once per
    /// suffix with `item`.
    ///
    /// `word` must end with a sentinel element that does not occur earlier
    /// in it (see the module docs). Runs in amortized O(|word|).
    pub fn add_word(&mut self, word: &[C], item: D) {
        assert!(!word.is_empty(), "cannot index an empty sequence");
        let source: Arc<[C]> = Arc::from(word);
        let n = word.len();
        let mut active = self.root_node();
        let mut height = 0usize;
        let mut previous_leaf: Option<BranchId> = None;
        for i in 0..n {
            let c = &word[i];
            let mut pending_split: Option<BranchId> = None;
            loop {
                if let Some(advanced) = self.try_advance(active, c) {
                    // The suffix already exists implicitly. A pending
                    // split's link target is the explicit node we stand on.
                    if let Some(pending) = pending_split.take() {
                        debug_assert_eq!(
                            active.offset,
                            self.radix.branch(active.branch).length()
                        );
                        self.radix.set_suffix_link(pending, active.branch);
                    }
                    active = advanced;
                    height += 1;
                    if i == n - 1 {
                        self.credit_existing_suffixes(word, &item, active, previous_leaf.take());
                    }
                    break;
                }
                let leaf = self
                    .radix
                    .new_branch(source.clone(), i, n - i, i - height);
                let (attached_at, did_split) = self.add_branch(active, leaf);
                self.processor.on_word_add(
                    word,
                    &item,
                    self.radix.branch_mut(leaf).node_data_mut(),
                );
                if let Some(previous) = previous_leaf {
                    self.radix.set_suffix_link(previous, leaf);
                }
                previous_leaf = Some(leaf);
                if let Some(pending) = pending_split.take() {
                    self.radix.set_suffix_link(pending, attached_at.branch);
                }
                if did_split {
                    pending_split = Some(attached_at.branch);
                }
                match self.follow_link(attached_at) {
                    Some(next) => {
                        active = next;
                        height -= 1;
                    }
                    None => {
                        active = self.root_node();
                        height = 0;
                        break;
                    }
                }
            }
        }
    }

    /// Invoke the processor for every suffix that already exists in the
    /// tree, walking the suffix-link chain from `from` toward the root and
    /// threading the predecessor leaf's link through the visited branches.
    fn credit_existing_suffixes(
        &mut self,
        word: &[C],
        item: &D,
        from: Node,
        mut predecessor: Option<BranchId>,
    ) {
        let mut position = from;
        while position.branch != ROOT {
            self.processor.on_word_add(
                word,
                item,
                self.radix.branch_mut(position.branch).node_data_mut(),
            );
            if let Some(previous) = predecessor {
                self.radix.set_suffix_link(previous, position.branch);
            }
            predecessor = Some(position.branch);
            match self.follow_link(position) {
                Some(next) => position = next,
                None => break,
            }
        }
    }

    /// For every suffix `query[i..]`, the longest prefix of it present in
    /// the tree, together with the position realizing the match and its
    /// surrounding explicit nodes. Runs in amortized O(|query|).
    ///
    /// An empty tree (or a query over unseen elements) yields all-zero
    /// lengths; a query longer than any indexed suffix simply records
    /// shorter matches.
    pub fn get_matching_statistics(&self, query: &[C]) -> Vec<MatchEntry> {
        let mut entries = Vec::with_capacity(query.len());
        let mut node = self.root_node();
        let mut length = 0usize;
        for start in 0..query.len() {
            while start + length < query.len() {
                match self.try_advance(node, &query[start + length]) {
                    Some(next) => {
                        node = next;
                        length += 1;
                    }
                    None => break,
                }
            }
            entries.push(MatchEntry {
                start,
                length,
                node,
                floor: self.floor(node),
                ceil: self.ceil(node),
            });
            if length > 0 {
                node = match self.follow_link(node) {
                    Some(next) => next,
                    None => self.root_node(),
                };
                length -= 1;
            }
        }
        entries
    }
}
