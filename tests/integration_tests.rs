//! End-to-end scenarios across the three tree flavors and the edit engine.

use libsuffix::prelude::*;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn as_string(elements: Vec<char>) -> String {
    elements.into_iter().collect()
}

#[test]
fn word_tree_prefix_search_enumerates_stored_words() {
    let mut tree: WordTree<char, ()> = WordTree::new();
    for word in ["cat$", "car$", "cart$"] {
        tree.add_word(&chars(word), ());
    }
    let mut found: Vec<String> = tree
        .exact_prefix_search(&chars("ca"))
        .iter()
        .map(|result| as_string(tree.matched_word(result)))
        .collect();
    found.sort();
    assert_eq!(found, vec!["car$", "cart$", "cat$"]);
}

#[test]
fn suffix_tree_finds_substrings_and_statistics() {
    let mut tree: SuffixTree<char, ()> = SuffixTree::new();
    tree.add_word(&chars("banana$"), ());

    let result = tree.longest_common_prefix(&chars("nan"));
    assert_eq!(as_string(tree.radix().matched_word(&result)), "nan");

    let lengths: Vec<usize> = tree
        .get_matching_statistics(&chars("ann"))
        .iter()
        .map(|entry| entry.length)
        .collect();
    assert_eq!(lengths, vec![2, 1, 1]);
}

#[test]
fn approximate_search_distinguishes_near_and_far_words() {
    let mut tree: WordTree<char, ()> = WordTree::new();
    tree.add_word(&chars("kitten$"), ());
    tree.add_word(&chars("sitting$"), ());

    let query = chars("kittin$");
    let matches = tree.approximate_search(&query, 1.0, standard_distance);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edit_distance, 1.0);
    assert_eq!(as_string(tree.matched_word(&matches[0])), "kitten$");

    assert!(tree
        .approximate_search(&query, 0.0, standard_distance)
        .is_empty());
}

#[test]
fn edit_script_for_kitten_sitting_costs_three() {
    let commands = get_edit_commands(&chars("kitten"), &chars("sitting"), standard_distance);
    let total: f64 = commands.iter().map(EditCommand::cost).sum();
    assert_eq!(total, 3.0);
    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[0],
        EditCommand::Replace {
            source_index: 0,
            character: 's',
            cost: 1.0
        }
    );
    assert_eq!(
        commands[1],
        EditCommand::Replace {
            source_index: 4,
            character: 'i',
            cost: 1.0
        }
    );
    assert_eq!(
        commands[2],
        EditCommand::Insert {
            source_index: 6,
            character: 'g',
            cost: 1.0
        }
    );
}

#[test]
fn sum_kernel_counts_substring_incidences() {
    let mut tree = KernelSuffixTree::new(SumWeight);
    tree.add_word(&chars("aba$"), 1.0);
    tree.add_word(&chars("bab$"), 1.0);
    // Occurrences of each substring occurrence of "aba" in both hosts:
    // a(3) + ab(2) + aba(1) + b(3) + ba(2) + a(3) = 14.
    assert_eq!(tree.compute_kernel(&chars("aba")), 14.0);
}

#[test]
fn exponential_kernel_is_finite_positive_and_below_sum() {
    let mut sum_tree = KernelSuffixTree::new(SumWeight);
    sum_tree.add_word(&chars("aba$"), 1.0);
    sum_tree.add_word(&chars("bab$"), 1.0);
    let mut exp_tree = KernelSuffixTree::new(ExpWeight::new(0.5));
    exp_tree.add_word(&chars("aba$"), 1.0);
    exp_tree.add_word(&chars("bab$"), 1.0);

    let sum = sum_tree.compute_kernel(&chars("aba"));
    let exp = exp_tree.compute_kernel(&chars("aba"));
    assert!(exp.is_finite());
    assert!(exp > 0.0);
    assert!(exp < sum);
}

#[test]
fn empty_query_against_empty_tree_is_empty() {
    let tree: WordTree<char, ()> = WordTree::new();
    assert!(tree.exact_prefix_search(&[]).is_empty());
    assert!(tree
        .approximate_search(&[], 2.0, standard_distance)
        .is_empty());

    let suffix: SuffixTree<char, ()> = SuffixTree::new();
    assert!(suffix.get_matching_statistics(&[]).is_empty());
}

#[test]
fn single_word_single_letter_alphabet() {
    let mut tree: WordTree<char, ()> = WordTree::new();
    tree.add_word(&chars("aaa$"), ());
    assert_eq!(tree.exact_prefix_search(&chars("a")).len(), 1);
    let matches = tree.approximate_search(&chars("aa$"), 1.0, standard_distance);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edit_distance, 1.0);
}

#[test]
fn unbounded_distance_returns_every_stored_word() {
    let mut tree: WordTree<char, ()> = WordTree::new();
    let words = ["foo$", "bar$", "baz$", "qux$", "quux$"];
    for word in words {
        tree.add_word(&chars(word), ());
    }
    let matches = tree.approximate_search(&chars("zzz"), f64::INFINITY, standard_distance);
    assert_eq!(matches.len(), words.len());
}

#[test]
fn storage_processor_collects_items_per_word() {
    let mut tree: WordTree<char, u32, ItemStorage<u32>, StorageProcessor> =
        WordTree::with_processor(StorageProcessor);
    tree.add_word(&chars("alpha$"), 1);
    tree.add_word(&chars("alpha$"), 2);
    tree.add_word(&chars("beta$"), 3);
    let result = tree.exact_search(&chars("alpha$")).unwrap();
    assert_eq!(
        tree.radix().branch(result.branch).node_data().items,
        vec![1, 2]
    );
}

#[test]
fn shared_sentinel_shares_suffix_leaves() {
    // Both words end in the same sentinel, so the "$" suffix leaf is
    // shared and credited once per word.
    let mut tree = KernelSuffixTree::new(SumWeight);
    tree.add_word(&chars("ab$"), 1.0);
    tree.add_word(&chars("cd$"), 1.0);
    // "ab" occurs once, in one host: a + ab + b = 3 incidences.
    assert_eq!(tree.compute_kernel(&chars("ab")), 3.0);
}

#[test]
fn suffix_tree_over_multiple_words_matches_across_them() {
    let mut tree: SuffixTree<char, ()> = SuffixTree::new();
    tree.add_word(&chars("banana$"), ());
    tree.add_word(&chars("bandana#"), ());
    // "nda" only occurs in the second word, "nan" only in the first.
    assert!(tree.radix().exact_search(&chars("nda")).is_some());
    assert!(tree.radix().exact_search(&chars("nan")).is_some());
    assert!(tree.radix().exact_search(&chars("nanad")).is_none());

    let lengths: Vec<usize> = tree
        .get_matching_statistics(&chars("andana"))
        .iter()
        .map(|entry| entry.length)
        .collect();
    assert_eq!(lengths, vec![6, 5, 4, 3, 2, 1]);
}

#[test]
fn edit_distance_helpers_agree_with_known_values() {
    assert_eq!(
        edit_distance(&chars("kitten"), &chars("sitting"), standard_distance),
        3.0
    );
    assert_eq!(edit_distance(&chars(""), &chars("abc"), standard_distance), 3.0);
    assert_eq!(edit_distance(&chars("abc"), &chars(""), standard_distance), 3.0);
    assert_eq!(edit_distance(&chars(""), &chars(""), standard_distance), 0.0);
}

#[test]
fn generic_elements_beyond_char() {
    // Sequences of u32 with a numeric sentinel.
    let mut tree: SuffixTree<u32, ()> = SuffixTree::new();
    tree.add_word(&[7, 8, 9, u32::MAX], ());
    tree.add_word(&[8, 9, 10, u32::MAX - 1], ());
    assert!(tree.radix().exact_search(&[8, 9]).is_some());
    assert!(tree.radix().exact_search(&[9, 10]).is_some());
    assert!(tree.radix().exact_search(&[7, 9]).is_none());
}
