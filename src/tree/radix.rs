//! The generic radix-tree substrate.

use std::hash::Hash;
use std::sync::Arc;

use crate::edit::EditColumn;
use crate::error::{Result, TreeError};
use crate::tree::branch::{Branch, BranchId, ROOT};

/// A position where a search ended.
///
/// `match_end_offset` lies in `0..=branch.length`; the matched sequence is
/// reconstructable through [`RadixTree::matched_word`]. Exact searches
/// report an `edit_distance` of `0.0`; approximate search reports the
/// surviving cell value for the matched leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// The branch the match ended in.
    pub branch: BranchId,
    /// Offset into the branch label where the match ended.
    pub match_end_offset: usize,
    /// Edit distance of the match (`0.0` for exact searches).
    pub edit_distance: f64,
}

/// A compressed trie over generic elements, holding its branches in an
/// arena indexed by [`BranchId`].
///
/// The tree itself has no insertion policy; [`WordTree`](crate::tree::WordTree)
/// and [`SuffixTree`](crate::tree::SuffixTree) build on top of the branch
/// surgery exposed here. Searches and traversals are policy-free and
/// shared by both.
#[derive(Debug, Clone)]
pub struct RadixTree<C, N> {
    branches: Vec<Branch<C, N>>,
}

impl<C, N> RadixTree<C, N>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    /// An empty tree: a lone root whose suffix link is itself.
    pub fn new() -> Self {
        Self {
            branches: vec![Branch::root(N::default())],
        }
    }

    /// Drop every branch and install a fresh root.
    pub fn clear(&mut self) {
        self.branches.clear();
        self.branches.push(Branch::root(N::default()));
    }

    /// The root's id (stable across the tree's lifetime).
    #[inline]
    pub fn root(&self) -> BranchId {
        ROOT
    }

    /// Total number of branches, including the root.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// The branch stored at `id`.
    #[inline]
    pub fn branch(&self, id: BranchId) -> &Branch<C, N> {
        &self.branches[id]
    }

    /// Mutable access to the branch stored at `id`.
    #[inline]
    pub fn branch_mut(&mut self, id: BranchId) -> &mut Branch<C, N> {
        &mut self.branches[id]
    }

    pub(crate) fn new_branch(
        &mut self,
        source: Arc<[C]>,
        start: usize,
        length: usize,
        word_start: usize,
    ) -> BranchId {
        self.branches
            .push(Branch::new(source, start, length, word_start, N::default()));
        self.branches.len() - 1
    }

    pub(crate) fn set_suffix_link(&mut self, id: BranchId, target: BranchId) {
        self.branches[id].suffix_link = target;
    }

    /// Attach `child` under `parent`, keyed by the child's first label
    /// element. Fails when a sibling already claims that element or when
    /// the child's label is empty.
    pub fn add_child(&mut self, parent: BranchId, child: BranchId) -> Result<()> {
        if self.branches[child].length == 0 {
            return Err(TreeError::EmptyLabel);
        }
        let first = self.branches[child].char_at(0).clone();
        if self.branches[parent].children.contains_key(&first) {
            return Err(TreeError::DuplicateChild);
        }
        self.branches[parent].children.insert(first, child);
        self.branches[child].parent = Some(parent);
        Ok(())
    }

    /// Infallible attach used by insertion paths that already checked the
    /// leading element is free.
    pub(crate) fn attach_child(&mut self, parent: BranchId, child: BranchId) {
        let first = self.branches[child].char_at(0).clone();
        let previous = self.branches[parent].children.insert(first, child);
        debug_assert!(previous.is_none(), "sibling leading elements must be unique");
        self.branches[child].parent = Some(parent);
    }

    /// Detach the child keyed by `first` from `parent`. Does nothing when
    /// no such child exists; the detached branch stays in the arena until
    /// the next [`clear`](RadixTree::clear).
    pub fn remove_child(&mut self, parent: BranchId, first: &C) {
        if let Some(child) = self.branches[parent].children.remove(first) {
            self.branches[child].parent = None;
        }
    }

    /// Split the branch at `offset`, materializing the implicit node there.
    ///
    /// The new upper branch takes the label prefix `[start, start+offset)`,
    /// inherits the original's `word_start` and parent slot, and becomes
    /// the original's unique parent; the original keeps the label tail.
    /// Returns the upper branch's id.
    ///
    /// # Panics
    ///
    /// Panics when `id` is the root or `offset` does not fall strictly
    /// inside the label; both are programming errors.
    pub fn split(&mut self, id: BranchId, offset: usize) -> BranchId {
        assert!(id != ROOT, "cannot split the root");
        let length = self.branches[id].length;
        assert!(
            offset > 0 && offset < length,
            "split offset must fall strictly inside the label"
        );
        let (source, start, word_start, parent) = {
            let branch = &self.branches[id];
            (
                branch.source.clone(),
                branch.start,
                branch.word_start,
                branch.parent.expect("a non-root branch always has a parent"),
            )
        };
        let upper = self.new_branch(source.clone(), start, offset, word_start);
        self.branches[upper].parent = Some(parent);
        self.branches[parent]
            .children
            .insert(source[start].clone(), upper);
        {
            let branch = &mut self.branches[id];
            branch.start += offset;
            branch.length -= offset;
            branch.parent = Some(upper);
        }
        let mid = self.branches[id].char_at(0).clone();
        self.branches[upper].children.insert(mid, id);
        upper
    }

    /// Walk downward from `from_branch`, matching `word[from_index..]`
    /// element by element. Returns the landing branch, the offset of the
    /// last matched element inside it, and how many elements matched.
    pub(crate) fn descend(
        &self,
        word: &[C],
        from_index: usize,
        from_branch: BranchId,
    ) -> (BranchId, usize, usize) {
        let mut at = from_branch;
        let mut offset = self.branches[at].length;
        let mut index = from_index;
        loop {
            let branch = &self.branches[at];
            while offset < branch.length
                && index < word.len()
                && *branch.char_at(offset) == word[index]
            {
                offset += 1;
                index += 1;
            }
            if offset < branch.length || index == word.len() {
                return (at, offset, index - from_index);
            }
            match branch.children.get(&word[index]) {
                Some(&child) => {
                    at = child;
                    offset = 0;
                }
                None => return (at, offset, index - from_index),
            }
        }
    }

    /// The deepest position whose root path matches a prefix of
    /// `word[from_index..]`, starting from the far end of `from_branch`.
    pub fn longest_common_prefix(
        &self,
        word: &[C],
        from_index: usize,
        from_branch: BranchId,
    ) -> SearchResult {
        let (branch, match_end_offset, _) = self.descend(word, from_index, from_branch);
        SearchResult {
            branch,
            match_end_offset,
            edit_distance: 0.0,
        }
    }

    /// The position where `word` ends, if the tree contains the entire
    /// sequence (as a path, not necessarily as a stored word).
    pub fn exact_search(&self, word: &[C]) -> Option<SearchResult> {
        let (branch, match_end_offset, consumed) = self.descend(word, 0, ROOT);
        (consumed == word.len()).then_some(SearchResult {
            branch,
            match_end_offset,
            edit_distance: 0.0,
        })
    }

    /// Every stored sequence starting with `word`: one result per
    /// childless branch in the subtree below the position where `word`
    /// ends (including that branch itself when it is a childless
    /// non-root). Empty when `word` is not fully present.
    pub fn exact_prefix_search(&self, word: &[C]) -> Vec<SearchResult> {
        let (branch, _, consumed) = self.descend(word, 0, ROOT);
        if consumed < word.len() {
            return Vec::new();
        }
        let mut results = Vec::new();
        self.dfs_visit(branch, &mut |tree, id| {
            if id != ROOT && tree.branches[id].is_leaf() {
                results.push(SearchResult {
                    branch: id,
                    match_end_offset: tree.branches[id].length,
                    edit_distance: 0.0,
                });
            }
        });
        results
    }

    /// Every stored sequence within `max_distance` of `word` under the
    /// given replacement cost.
    ///
    /// The traversal carries an [`EditColumn`] down the tree, deriving the
    /// next column per label element and pruning a subtree as soon as its
    /// column loses every cell. A match is recorded at childless branches
    /// whose final column keeps the terminal row within the bound; the
    /// result carries that cell as its `edit_distance`.
    pub fn approximate_search<F>(
        &self,
        word: &[C],
        max_distance: f64,
        distance_fn: F,
    ) -> Vec<SearchResult>
    where
        F: Fn(&C, &C) -> f64,
    {
        let mut results = Vec::new();
        let initial = EditColumn::initial(word.len(), max_distance);
        if initial.is_empty() {
            return results;
        }
        let final_row = word.len() as isize - 1;
        let mut stack: Vec<(BranchId, EditColumn)> = self.branches[ROOT]
            .children
            .values()
            .map(|&child| (child, initial.clone()))
            .collect();
        while let Some((id, mut column)) = stack.pop() {
            let branch = &self.branches[id];
            let mut pruned = false;
            for offset in 0..branch.length {
                match column.create_next(
                    word,
                    max_distance,
                    &distance_fn,
                    branch.char_at(offset),
                ) {
                    Some(next) => column = next,
                    None => {
                        pruned = true;
                        break;
                    }
                }
            }
            if pruned {
                continue;
            }
            if branch.is_leaf() {
                let distance = column.get(final_row);
                if distance <= max_distance {
                    results.push(SearchResult {
                        branch: id,
                        match_end_offset: branch.length,
                        edit_distance: distance,
                    });
                }
            } else {
                stack.extend(
                    branch
                        .children
                        .values()
                        .map(|&child| (child, column.clone())),
                );
            }
        }
        results
    }

    /// Reconstruct the matched sequence of a search result, from the
    /// beginning of the inserted word up to the match end.
    pub fn matched_word(&self, result: &SearchResult) -> Vec<C> {
        let branch = &self.branches[result.branch];
        branch.source[branch.word_start..branch.start + result.match_end_offset].to_vec()
    }

    /// Visit `from` and every branch below it, in depth-first order.
    pub fn dfs_visit<F>(&self, from: BranchId, visit: &mut F)
    where
        F: FnMut(&Self, BranchId),
    {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            visit(self, id);
            stack.extend(self.branches[id].children.values().copied());
        }
    }

    /// Accumulate a value bottom-up: `process` receives each branch after
    /// all of its children, together with the children's results.
    pub fn post_order_process<T>(
        &mut self,
        from: BranchId,
        process: &mut dyn FnMut(&mut Branch<C, N>, Vec<T>) -> T,
    ) -> T {
        let children: Vec<BranchId> = self.branches[from].children.values().copied().collect();
        let mut results = Vec::with_capacity(children.len());
        for child in children {
            results.push(self.post_order_process(child, process));
        }
        process(&mut self.branches[from], results)
    }

    /// Propagate a value top-down: `process` receives each branch together
    /// with its parent's accumulator and produces the accumulator passed
    /// to the branch's children.
    pub fn pre_order_process<T>(
        &mut self,
        from: BranchId,
        seed: &T,
        process: &mut dyn FnMut(&mut Branch<C, N>, &T) -> T,
    ) {
        let next = process(&mut self.branches[from], seed);
        let children: Vec<BranchId> = self.branches[from].children.values().copied().collect();
        for child in children {
            self.pre_order_process(child, &next, process);
        }
    }
}

impl<C, N> Default for RadixTree<C, N>
where
    C: Clone + Eq + Hash,
    N: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::standard_distance;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Insert words the way a word tree does, without the processor hook.
    fn insert(tree: &mut RadixTree<char, ()>, word: &str) {
        let word = chars(word);
        let (branch, offset, consumed) = tree.descend(&word, 0, tree.root());
        if consumed == word.len() {
            if offset < tree.branch(branch).length() {
                tree.split(branch, offset);
            }
            return;
        }
        let parent = if offset < tree.branch(branch).length() {
            tree.split(branch, offset)
        } else {
            branch
        };
        let source: Arc<[char]> = Arc::from(word.clone());
        let leaf = tree.new_branch(source, consumed, word.len() - consumed, 0);
        tree.attach_child(parent, leaf);
    }

    fn sample_tree() -> RadixTree<char, ()> {
        let mut tree = RadixTree::new();
        for word in ["cat$", "car$", "cart$"] {
            insert(&mut tree, word);
        }
        tree
    }

    #[test]
    fn split_rewires_parent_and_label() {
        let mut tree: RadixTree<char, ()> = RadixTree::new();
        insert(&mut tree, "abcdef");
        let word = chars("abcdef");
        let leaf = tree.descend(&word, 0, tree.root()).0;
        let upper = tree.split(leaf, 2);
        assert_eq!(tree.branch(upper).label(), &chars("ab")[..]);
        assert_eq!(tree.branch(leaf).label(), &chars("cdef")[..]);
        assert_eq!(tree.branch(leaf).parent(), Some(upper));
        assert_eq!(tree.branch(upper).parent(), Some(tree.root()));
        assert_eq!(tree.branch(upper).child(&'c'), Some(leaf));
    }

    #[test]
    #[should_panic(expected = "strictly inside")]
    fn split_at_boundary_panics() {
        let mut tree: RadixTree<char, ()> = RadixTree::new();
        insert(&mut tree, "ab");
        let word = chars("ab");
        let leaf = tree.descend(&word, 0, tree.root()).0;
        tree.split(leaf, 2);
    }

    #[test]
    fn add_child_rejects_sibling_collision() {
        let mut tree: RadixTree<char, ()> = RadixTree::new();
        insert(&mut tree, "abc");
        let source: Arc<[char]> = Arc::from(chars("axe"));
        let clashing = tree.new_branch(source, 0, 3, 0);
        assert_eq!(
            tree.add_child(tree.root(), clashing),
            Err(TreeError::DuplicateChild)
        );
    }

    #[test]
    fn add_child_rejects_empty_label() {
        let mut tree: RadixTree<char, ()> = RadixTree::new();
        let source: Arc<[char]> = Arc::from(chars("x"));
        let empty = tree.new_branch(source, 0, 0, 0);
        assert_eq!(tree.add_child(tree.root(), empty), Err(TreeError::EmptyLabel));
    }

    #[test]
    fn remove_child_is_idempotent_on_miss() {
        let mut tree = sample_tree();
        tree.remove_child(tree.root(), &'z');
        tree.remove_child(tree.root(), &'c');
        tree.remove_child(tree.root(), &'c');
        assert!(tree.exact_prefix_search(&chars("ca")).is_empty());
    }

    #[test]
    fn exact_search_requires_full_consumption() {
        let tree = sample_tree();
        assert!(tree.exact_search(&chars("cat$")).is_some());
        assert!(tree.exact_search(&chars("ca")).is_some());
        assert!(tree.exact_search(&chars("dog")).is_none());
        assert!(tree.exact_search(&chars("cats")).is_none());
    }

    #[test]
    fn prefix_search_enumerates_stored_words() {
        let tree = sample_tree();
        let mut found: Vec<String> = tree
            .exact_prefix_search(&chars("ca"))
            .iter()
            .map(|result| tree.matched_word(result).into_iter().collect())
            .collect();
        found.sort();
        assert_eq!(found, vec!["car$", "cart$", "cat$"]);
    }

    #[test]
    fn prefix_search_diverging_at_root_is_empty() {
        let tree = sample_tree();
        assert!(tree.exact_prefix_search(&chars("x")).is_empty());
    }

    #[test]
    fn empty_prefix_returns_every_stored_word() {
        let tree = sample_tree();
        assert_eq!(tree.exact_prefix_search(&chars("")).len(), 3);
    }

    #[test]
    fn approximate_search_finds_near_matches() {
        let mut tree: RadixTree<char, ()> = RadixTree::new();
        insert(&mut tree, "kitten$");
        insert(&mut tree, "sitting$");
        let query = chars("kittin$");
        let matches = tree.approximate_search(&query, 1.0, standard_distance);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].edit_distance, 1.0);
        let matched: String = tree.matched_word(&matches[0]).into_iter().collect();
        assert_eq!(matched, "kitten$");
        assert!(tree
            .approximate_search(&query, 0.0, standard_distance)
            .is_empty());
    }

    #[test]
    fn approximate_search_with_zero_distance_is_exact() {
        let tree = sample_tree();
        let matches = tree.approximate_search(&chars("cat$"), 0.0, standard_distance);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].edit_distance, 0.0);
        let matched: String = tree.matched_word(&matches[0]).into_iter().collect();
        assert_eq!(matched, "cat$");
    }

    #[test]
    fn approximate_search_with_unbounded_distance_returns_all_leaves() {
        let tree = sample_tree();
        let matches = tree.approximate_search(&chars("zzz"), f64::INFINITY, standard_distance);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn approximate_search_on_empty_tree_is_empty() {
        let tree: RadixTree<char, ()> = RadixTree::new();
        assert!(tree
            .approximate_search(&chars("abc"), f64::INFINITY, standard_distance)
            .is_empty());
    }

    #[test]
    fn traversals_accumulate_in_both_directions() {
        let mut tree = sample_tree();
        let root = tree.root();
        // Leaf count per subtree, bottom-up.
        let total = tree.post_order_process(root, &mut |branch, child_counts: Vec<usize>| {
            if branch.is_leaf() {
                1
            } else {
                child_counts.into_iter().sum()
            }
        });
        assert_eq!(total, 3);
        // Depth in branches, top-down.
        let mut max_depth = 0usize;
        tree.pre_order_process(root, &0usize, &mut |_, depth| {
            let next = depth + 1;
            max_depth = max_depth.max(next);
            next
        });
        assert_eq!(max_depth, 4); // root, "ca", "r", leaf
    }

    #[test]
    fn clear_resets_to_a_lone_root() {
        let mut tree = sample_tree();
        tree.clear();
        assert_eq!(tree.branch_count(), 1);
        assert!(tree.branch(tree.root()).is_leaf());
        assert_eq!(tree.branch(tree.root()).suffix_link(), tree.root());
    }
}
