use nwkit::model::{LabelIndex, NodeIndex, Tree};
use nwkit::newick::{parse_str, to_newick};
use nwkit::ops::{PruneMode, Pruner, SubgraphMatcher, Trimmer, order_tree};
use proptest::prelude::*;
use std::collections::HashMap;

/// Builds a random tree on leaves `L0..L{num_leaves}` with integer branch
/// lengths, merging two or three subtrees at a time.
fn random_newick(num_leaves: usize, choices: &[u32], lengths: &[u32]) -> String {
    let mut pick = choices.iter().cycle().map(|&c| c as usize);
    let mut length = lengths.iter().cycle();
    let mut subtrees: Vec<String> = (0..num_leaves)
        .map(|i| format!("L{i}:{}", length.next().unwrap()))
        .collect();

    while subtrees.len() > 1 {
        let arity = (2 + pick.next().unwrap() % 2).min(subtrees.len());
        let mut group = Vec::with_capacity(arity);
        for _ in 0..arity {
            let i = pick.next().unwrap() % subtrees.len();
            group.push(subtrees.swap_remove(i));
        }
        subtrees.push(format!("({}):{}", group.join(","), length.next().unwrap()));
    }
    format!("{};", subtrees[0])
}

fn tree_strategy() -> impl Strategy<Value = String> {
    (
        2usize..24,
        prop::collection::vec(any::<u32>(), 1..64),
        prop::collection::vec(1u32..50, 1..64),
    )
        .prop_map(|(n, choices, lengths)| random_newick(n, &choices, &lengths))
}

fn leaf_distances(tree: &Tree) -> HashMap<String, f64> {
    tree.nodes()
        .filter(|n| n.is_leaf())
        .map(|n| {
            let distance = tree.distance_from_root(n.index()).unwrap();
            (n.label().to_string(), distance)
        })
        .collect()
}

proptest! {
    #[test]
    fn order_is_idempotent_and_ignores_sibling_order(newick in tree_strategy()) {
        let mut tree = parse_str(&newick).unwrap();
        let mut reversed = tree.clone();
        let inner: Vec<NodeIndex> = reversed
            .nodes()
            .filter(|n| !n.is_leaf())
            .map(|n| n.index())
            .collect();
        for index in inner {
            reversed.sort_children_by(index, |a, b| b.cmp(a)).unwrap();
        }

        let ordered = order_tree(&mut tree).unwrap();
        prop_assert_eq!(&order_tree(&mut tree).unwrap(), &ordered);
        prop_assert_eq!(&order_tree(&mut reversed).unwrap(), &ordered);
        prop_assert!(tree.is_valid());
    }

    #[test]
    fn splicing_keeps_tree_valid_and_distances(newick in tree_strategy(), pick in any::<usize>()) {
        let mut tree = parse_str(&newick).unwrap();
        let before = leaf_distances(&tree);
        let inner: Vec<NodeIndex> = tree
            .nodes()
            .filter(|n| !n.is_leaf() && !n.is_root())
            .map(|n| n.index())
            .collect();
        prop_assume!(!inner.is_empty());

        tree.remove_node(inner[pick % inner.len()]).unwrap();
        prop_assert!(tree.is_valid());
        prop_assert_eq!(leaf_distances(&tree), before);
        prop_assert_eq!(tree.nodes_in_order().len(), tree.num_nodes());
    }

    #[test]
    fn label_index_finds_every_key(
        keys in prop::collection::vec("[A-Za-z_]{0,12}", 0..200),
        initial_bins in 1usize..8,
    ) {
        let mut index = LabelIndex::new_dynamic(initial_bins, 0.75, 2);
        let mut expected = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            index.set(key, i).unwrap();
            expected.insert(key.clone(), i);
        }

        prop_assert_eq!(index.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(index.get(key), Some(value));
        }
        if !expected.is_empty() {
            // Only the last insertion may exceed the threshold
            prop_assert!(index.load_factor() < 0.75 + 1.0 / index.num_bins() as f64);
        }
    }

    #[test]
    fn reduced_tree_matches_its_source(newick in tree_strategy(), keep in 2usize..24) {
        let tree = parse_str(&newick).unwrap();
        let labels: Vec<String> = tree.leaf_labels().take(keep).map(String::from).collect();
        prop_assume!(labels.len() >= 2);

        let mut pattern = tree.clone();
        Pruner::new(&labels)
            .unwrap()
            .with_mode(PruneMode::Reverse)
            .prune(&mut pattern)
            .unwrap();

        let matcher = SubgraphMatcher::new(pattern).unwrap();
        prop_assert!(matcher.is_match(&tree).unwrap());
        prop_assert_eq!(to_newick(&parse_str(&newick).unwrap()), to_newick(&tree));
        let reverse = matcher.with_reverse(true);
        prop_assert!(!reverse.is_match(&tree).unwrap());
    }

    #[test]
    fn trimmed_tree_stays_within_threshold(newick in tree_strategy(), threshold in 1u32..120) {
        let threshold = f64::from(threshold);
        let mut tree = parse_str(&newick).unwrap();
        let before = leaf_distances(&tree);
        Trimmer::new(threshold).trim(&mut tree).unwrap();

        prop_assert!(tree.is_valid());
        for node in tree.nodes() {
            prop_assert!(tree.distance_from_root(node.index()).unwrap() <= threshold + 1e-9);
        }
        // Leaves within reach are untouched
        let after = leaf_distances(&tree);
        for (label, distance) in before.iter().filter(|(_, d)| **d <= threshold) {
            prop_assert_eq!(after.get(label), Some(distance));
        }
    }
}
