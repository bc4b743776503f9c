//! Canonical sibling order.
//!
//! Ordering sorts the children of every node by the Newick text of their
//! (already ordered) subtrees. Two trees that differ only in the order of
//! siblings are therefore written identically after ordering, which is how
//! labeled trees are compared for isomorphism.

use crate::error::TreeError;
use crate::model::{NodeIndex, Tree};
use crate::newick::writer::write_node;
use log::trace;

/// Orders `tree` in place, bottom-up, so that siblings appear in ascending
/// order of their subtree's Newick text.
///
/// Ordering is idempotent, and the result only depends on the shape, labels
/// and branch lengths of the tree, not on the input order of siblings.
///
/// Returns the Newick text of the ordered tree (the same as
/// [`to_newick`](crate::newick::to_newick) would produce).
///
/// # Errors
/// [TreeError::NodeNotFound] if the tree's links point to released nodes.
///
/// # Example
/// ```
/// use nwkit::newick::{parse_str, to_newick};
/// use nwkit::ops::order::order_tree;
///
/// let mut tree = parse_str("((Tamias,Homo),Vulpes);").unwrap();
/// let newick = order_tree(&mut tree).unwrap();
/// assert_eq!(newick, "((Homo,Tamias),Vulpes);");
/// assert_eq!(to_newick(&tree), newick);
/// ```
pub fn order_tree(tree: &mut Tree) -> Result<String, TreeError> {
    if !tree.is_root_set() || !tree.contains(tree.root_index()) {
        return Ok(";".to_string());
    }

    let order = tree.nodes_in_order().to_vec();
    // Sort key of each node: its ordered subtree as Newick text
    let mut keys: Vec<Option<String>> = vec![None; tree.index_bound()];

    for index in order {
        if !tree[index].is_leaf() {
            tree.sort_children_by(index, |a, b| keys[*a].cmp(&keys[*b]))?;
        }
        let key = subtree_key(tree, index, &mut keys);
        keys[index] = Some(key);
    }

    let root = tree.root_index();
    let mut newick = keys[root].take().unwrap_or_default();
    trace!("ordered tree: {newick}");
    newick.push(';');
    Ok(newick)
}

/// Renders `index` from the keys of its children (consuming them).
fn subtree_key(tree: &Tree, index: NodeIndex, keys: &mut [Option<String>]) -> String {
    let mut key = String::new();
    write_node(&mut key, &tree[index], |out, child| {
        out.push_str(&keys[child].take().unwrap_or_default());
    });
    key
}

/// Returns whether ordering `tree` would leave its Newick text unchanged.
pub fn is_ordered(tree: &Tree) -> bool {
    let mut ordered = tree.clone();
    order_tree(&mut ordered).is_ok_and(|newick| newick == crate::newick::to_newick(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::{parse_str, subtree_to_newick};

    #[test]
    fn test_unlabeled_subtrees_sort_before_labeled_leaves() {
        let mut tree = parse_str("(Z,(B,A),(D,C)X);").unwrap();
        assert_eq!(order_tree(&mut tree).unwrap(), "((A,B),(C,D)X,Z);");
    }

    #[test]
    fn test_single_node_tree() {
        let mut tree = parse_str("A:1;").unwrap();
        assert_eq!(order_tree(&mut tree).unwrap(), "A:1;");
        assert!(is_ordered(&tree));
    }

    #[test]
    fn test_subtree_key_is_writer_output() {
        let tree = parse_str("(('a b':1,'''x''':2)95:3,(C,D)X:0.5)root:1;").unwrap();
        let mut keys: Vec<Option<String>> = vec![None; tree.index_bound()];
        for &index in tree.nodes_in_order() {
            let key = subtree_key(&tree, index, &mut keys);
            assert_eq!(key, subtree_to_newick(&tree, index));
            keys[index] = Some(key);
        }
    }
}
