use nwkit::model::{Edge, NodeIndex, SpliceOutcome, Tree};
use nwkit::newick::{parse_file, to_newick};
use nwkit::{TreeError, parse_newick_str};

const CATARRHINI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catarrhini.nw");

fn find(tree: &Tree, label: &str) -> NodeIndex {
    tree.nodes()
        .find(|n| n.label() == label)
        .unwrap_or_else(|| panic!("no node labeled '{label}'"))
        .index()
}

fn catarrhini() -> Tree {
    parse_file(CATARRHINI).unwrap().remove(0)
}

// --- TESTS CONSTRUCTION & VALIDATION ---
#[test]
fn test_build_tree_bottom_up() {
    let mut tree = Tree::new();
    let homo = tree.add_leaf("Homo", Edge::from_text("10"));
    let pan = tree.add_leaf("Pan", Edge::from_length(10.0));
    let hominini = tree.add_internal(vec![pan, homo], "Hominini", Edge::from_text("10"));
    let gorilla = tree.add_leaf("Gorilla", Edge::from_text("16"));
    let root = tree.add_root(vec![gorilla, hominini], "Homininae", Edge::without_length());

    assert!(tree.validate().is_ok());
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree[homo].parent(), Some(hominini));
    assert_eq!(tree[hominini].children(), &[pan, homo]);
    assert_eq!(to_newick(&tree), "(Gorilla:16,(Pan:10,Homo:10)Hominini:10)Homininae;");
}

#[test]
fn test_validate_without_root() {
    let mut tree = Tree::new();
    tree.add_leaf("A", Edge::without_length());
    assert!(!tree.is_root_set());
    assert_eq!(tree.validate(), Err(TreeError::RootNotSet));
    assert_eq!(to_newick(&tree), ";");
}

#[test]
fn test_validate_shared_child() {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Edge::without_length());
    let b = tree.add_leaf("B", Edge::without_length());
    let x = tree.add_internal(vec![a, b], "X", Edge::without_length());
    // 'A' now claims the second parent, 'X' still lists it
    let y = tree.add_internal(vec![a], "Y", Edge::without_length());
    tree.add_root(vec![x, y], "", Edge::without_length());

    assert!(matches!(
        tree.validate(),
        Err(TreeError::InconsistentLink(_) | TreeError::Cycle(_))
    ));
    assert!(!tree.is_valid());
}

#[test]
fn test_validate_detached_node() {
    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Edge::without_length());
    tree.add_leaf("stray", Edge::without_length());
    tree.add_root(vec![a], "", Edge::without_length());
    assert!(tree.validate().is_err());
}

#[test]
fn test_depth_and_distance() {
    let tree = catarrhini();
    let homo = find(&tree, "Homo");
    assert_eq!(tree.depth_of(homo), Ok(5));
    assert_eq!(tree.distance_from_root(homo), Ok(60.0));
    assert_eq!(tree.depth_of(tree.root_index()), Ok(0));
    assert_eq!(tree.depth_of(1000), Err(TreeError::NodeNotFound(1000)));
}

#[test]
fn test_nodes_in_order_is_post_order() {
    let tree = parse_newick_str("((A,B)X,(C)Y)R;").unwrap();
    let labels: Vec<_> = tree
        .nodes_in_order()
        .iter()
        .map(|&i| tree[i].label())
        .collect();
    assert_eq!(labels, ["A", "B", "X", "C", "Y", "R"]);
    assert_eq!(tree.nodes_in_order().last(), Some(&tree.root_index()));
}

#[test]
fn test_order_listing_follows_changes() {
    let mut tree = parse_newick_str("((A,B)X,C);").unwrap();
    let before = tree.nodes_in_order().to_vec();
    let generation = tree.generation();

    let x = find(&tree, "X");
    tree.sort_children_by(tree.root_index(), |a, b| b.cmp(a)).unwrap();
    assert!(tree.generation() > generation);
    assert_ne!(tree.nodes_in_order(), before.as_slice());
    assert_eq!(to_newick(&tree), "(C,(A,B)X);");

    tree.remove_node(x).unwrap();
    assert!(!tree.nodes_in_order().contains(&x));
    assert_eq!(tree.nodes_in_order().len(), tree.num_nodes());
}

#[test]
fn test_sort_children_of_released_node() {
    let mut tree = parse_newick_str("((A,B)X,C);").unwrap();
    let x = find(&tree, "X");
    tree.remove_node(x).unwrap();
    assert_eq!(
        tree.sort_children_by(x, |a, b| a.cmp(b)),
        Err(TreeError::NodeNotFound(x))
    );
}

// --- TESTS SPLICING ---
#[test]
fn test_remove_inner_node_keeps_position_and_lengths() {
    let mut tree = parse_newick_str("(P,(A:1,B:2)X:3,C:4);").unwrap();
    let x = find(&tree, "X");
    assert_eq!(tree.remove_node(x), Ok(SpliceOutcome::Removed));
    assert!(tree.is_valid());
    assert!(!tree.contains(x));
    assert_eq!(to_newick(&tree), "(P,A:4,B:5,C:4);");
}

#[test]
fn test_remove_leaf_collapses_parent() {
    let mut tree = parse_newick_str("((A:1,B:2)X:3,C:4);").unwrap();
    let a = find(&tree, "A");
    let x = find(&tree, "X");
    assert_eq!(tree.remove_node(a), Ok(SpliceOutcome::Removed));
    assert!(!tree.contains(x));
    assert!(tree.is_valid());
    assert_eq!(to_newick(&tree), "(B:5,C:4);");
}

#[test]
fn test_remove_leaf_collapses_root() {
    let mut tree = parse_newick_str("(A:1,(B:2,C:3)Y:4);").unwrap();
    let a = find(&tree, "A");
    let y = find(&tree, "Y");
    assert_eq!(tree.remove_node(a), Ok(SpliceOutcome::NewRoot(y)));
    assert_eq!(tree.root_index(), y);
    assert!(tree[y].is_root());
    assert!(tree.is_valid());
    assert_eq!(to_newick(&tree), "(B:2,C:3)Y:4;");
}

#[test]
fn test_remove_only_child_turns_parent_into_leaf() {
    let mut tree = parse_newick_str("((A)B,C);").unwrap();
    let a = find(&tree, "A");
    let b = find(&tree, "B");
    tree.remove_node(a).unwrap();
    assert!(tree[b].is_leaf());
    assert!(tree.is_valid());
    assert_eq!(to_newick(&tree), "(B,C);");
}

#[test]
fn test_remove_root() {
    let mut tree = parse_newick_str("(A,B)R;").unwrap();
    let root = tree.root_index();
    assert_eq!(
        tree.remove_node(root),
        Err(TreeError::AmbiguousRoot { num_children: 2 })
    );
    assert_eq!(to_newick(&tree), "(A,B)R;");

    let mut tree = parse_newick_str("((A,B)X:2)R:1;").unwrap();
    let x = find(&tree, "X");
    let root = tree.root_index();
    assert_eq!(tree.remove_node(root), Ok(SpliceOutcome::NewRoot(x)));
    assert_eq!(to_newick(&tree), "(A,B)X:3;");

    let mut tree = parse_newick_str("Alone;").unwrap();
    let root = tree.root_index();
    assert_eq!(tree.remove_node(root), Err(TreeError::TreeBecameEmpty));
    assert_eq!(tree.num_nodes(), 1);
}

#[test]
fn test_remove_released_node() {
    let mut tree = parse_newick_str("((A,B)X,C,D);").unwrap();
    let x = find(&tree, "X");
    tree.remove_node(x).unwrap();
    assert_eq!(tree.remove_node(x), Err(TreeError::NodeNotFound(x)));
    assert_eq!(tree.remove_subtree(x), Err(TreeError::NodeNotFound(x)));
}

#[test]
fn test_remove_subtree() {
    let mut tree = catarrhini();
    let hominini = find(&tree, "Hominini");
    let pan = find(&tree, "Pan");
    assert_eq!(tree.remove_subtree(hominini), Ok(SpliceOutcome::Removed));
    assert!(!tree.contains(pan));
    assert!(tree.is_valid());
    assert_eq!(tree.num_nodes(), 15);

    // Homininae was left with Gorilla alone
    let gorilla = find(&tree, "Gorilla");
    assert_eq!(tree[gorilla].edge().length(), Some(31.0));
    assert!(tree.nodes().all(|n| n.label() != "Homininae"));
}

#[test]
fn test_remove_subtree_of_root() {
    let mut tree = parse_newick_str("(A,B);").unwrap();
    let root = tree.root_index();
    assert_eq!(tree.remove_subtree(root), Err(TreeError::TreeBecameEmpty));
    assert_eq!(tree.num_nodes(), 3);
}

#[test]
fn test_discard_descendants() {
    let mut tree = catarrhini();
    let hominidae = find(&tree, "Hominidae");
    assert_eq!(tree.discard_descendants(hominidae), Ok(6));
    assert!(tree[hominidae].is_leaf());
    assert_eq!(tree[hominidae].edge().length_text(), "15");
    assert!(tree.is_valid());
    assert_eq!(tree.num_nodes(), 13);
}

#[test]
fn test_splicing_preserves_leaf_distances() {
    let mut tree = catarrhini();
    let distances: Vec<(String, f64)> = tree
        .nodes()
        .filter(|n| n.is_leaf())
        .map(|n| (n.label().to_string(), tree.distance_from_root(n.index()).unwrap()))
        .collect();

    let inner: Vec<NodeIndex> = tree
        .nodes()
        .filter(|n| !n.is_leaf() && !n.is_root())
        .map(|n| n.index())
        .collect();
    for index in inner {
        if tree.contains(index) {
            tree.remove_node(index).unwrap();
        }
    }

    assert!(tree.is_valid());
    assert_eq!(tree.num_nodes(), 11);
    for (label, distance) in distances {
        let leaf = find(&tree, &label);
        assert_eq!(tree.distance_from_root(leaf), Ok(distance), "distance of {label}");
    }
}
