//! Node removal that keeps the tree rooted and path lengths intact.
//!
//! All rewiring of parent/child references after construction goes through
//! the methods in this module, so both directions stay symmetric.

use crate::error::TreeError;
use crate::model::tree::{NodeIndex, Tree};
use log::{debug, trace};

/// Result of a successful removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// The node is gone; the root is unchanged.
    Removed,
    /// The node is gone and the given node is the new root.
    NewRoot(NodeIndex),
}

impl SpliceOutcome {
    /// Returns the index of the new root, if the root changed.
    pub fn new_root(&self) -> Option<NodeIndex> {
        match self {
            SpliceOutcome::Removed => None,
            SpliceOutcome::NewRoot(index) => Some(*index),
        }
    }

    fn merge(self, later: SpliceOutcome) -> SpliceOutcome {
        match later {
            SpliceOutcome::NewRoot(_) => later,
            SpliceOutcome::Removed => self,
        }
    }
}

impl Tree {
    /// Removes a node, promoting its children to its parent.
    ///
    /// The children take the node's place in the parent's child list, in
    /// their order, and their edges absorb the removed node's edge, so the
    /// distance from the parent to each of them is unchanged. If the parent
    /// is then left with a single child, the parent is spliced out the same
    /// way.
    ///
    /// Removing the root is allowed only if it has exactly one child, which
    /// then becomes the root.
    ///
    /// # Errors
    /// * [TreeError::NodeNotFound] - `index` is not a live node
    /// * [TreeError::TreeBecameEmpty] - `index` is a root without children
    /// * [TreeError::AmbiguousRoot] - `index` is a root with several children
    ///
    /// On error the tree is left unchanged.
    ///
    /// # Example
    /// ```
    /// use nwkit::{newick, parse_newick_str};
    ///
    /// let mut tree = parse_newick_str("((A:1,B:2)X:3,C:4);").unwrap();
    /// let x = tree.nodes().find(|n| n.label() == "X").unwrap().index();
    /// tree.remove_node(x).unwrap();
    /// assert_eq!(newick::to_newick(&tree), "(A:4,B:5,C:4);");
    /// ```
    pub fn remove_node(&mut self, index: NodeIndex) -> Result<SpliceOutcome, TreeError> {
        let node = self.get(index).ok_or(TreeError::NodeNotFound(index))?;

        let Some(parent) = node.parent() else {
            return self.remove_root(index);
        };

        let position = self[parent]
            .children()
            .iter()
            .position(|&c| c == index)
            .ok_or(TreeError::InconsistentLink(index))?;

        let removed_edge = self[index].edge().clone();
        let children = self[index].take_children();
        for &child in &children {
            let joined = self[child].edge().joined_with(&removed_edge);
            let child_node = &mut self[child];
            *child_node.edge_mut() = joined;
            child_node.set_parent(Some(parent));
        }
        trace!("splicing node {index}: {} children move to node {parent}", children.len());
        self[parent]
            .children_mut()
            .splice(position..position + 1, children);
        self.release(index);

        if self[parent].num_children() == 1 {
            debug!("node {parent} is left with a single child, splicing it out");
            return self.remove_node(parent);
        }
        Ok(SpliceOutcome::Removed)
    }

    fn remove_root(&mut self, index: NodeIndex) -> Result<SpliceOutcome, TreeError> {
        match self[index].num_children() {
            0 => Err(TreeError::TreeBecameEmpty),
            1 => {
                let child = self[index].children()[0];
                let joined = self[child].edge().joined_with(self[index].edge());
                let child_node = &mut self[child];
                *child_node.edge_mut() = joined;
                child_node.set_parent(None);

                self.release(index);
                self.set_root_index(child);
                debug!("root {index} removed, node {child} is the new root");
                Ok(SpliceOutcome::NewRoot(child))
            }
            num_children => Err(TreeError::AmbiguousRoot { num_children }),
        }
    }

    /// Removes a node together with all of its descendants, then collapses
    /// a parent left with a single child like [`remove_node`](Tree::remove_node).
    ///
    /// # Errors
    /// * [TreeError::NodeNotFound] - `index` is not a live node
    /// * [TreeError::TreeBecameEmpty] - `index` is the root
    pub fn remove_subtree(&mut self, index: NodeIndex) -> Result<SpliceOutcome, TreeError> {
        let node = self.get(index).ok_or(TreeError::NodeNotFound(index))?;
        if node.is_root() {
            return Err(TreeError::TreeBecameEmpty);
        }
        let discarded = self.discard_descendants(index)?;
        trace!("removing clade at node {index} ({discarded} descendants)");
        let outcome = self.remove_node(index)?;
        Ok(SpliceOutcome::Removed.merge(outcome))
    }

    /// Releases every descendant of a node, turning it into a leaf.
    ///
    /// The node keeps its label and its edge. Returns the number of released
    /// nodes.
    ///
    /// # Errors
    /// [TreeError::NodeNotFound] if `index` is not a live node.
    pub fn discard_descendants(&mut self, index: NodeIndex) -> Result<usize, TreeError> {
        let node = self.get_mut(index).ok_or(TreeError::NodeNotFound(index))?;
        let mut stack = node.take_children();
        let mut released = 0;
        while let Some(descendant) = stack.pop() {
            if let Some(mut node) = self.release(descendant) {
                stack.append(node.children_mut());
                released += 1;
            }
        }
        self.topology_changed();
        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::Edge;

    #[test]
    fn test_merge_keeps_latest_new_root() {
        assert_eq!(
            SpliceOutcome::NewRoot(3).merge(SpliceOutcome::Removed),
            SpliceOutcome::NewRoot(3)
        );
        assert_eq!(
            SpliceOutcome::Removed.merge(SpliceOutcome::NewRoot(5)),
            SpliceOutcome::NewRoot(5)
        );
    }

    #[test]
    fn test_failed_root_removal_leaves_tree_unchanged() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A", Edge::without_length());
        let b = tree.add_leaf("B", Edge::without_length());
        let root = tree.add_root(vec![a, b], "", Edge::without_length());
        let generation = tree.generation();

        assert_eq!(
            tree.remove_node(root),
            Err(TreeError::AmbiguousRoot { num_children: 2 })
        );
        assert_eq!(tree.generation(), generation);
        assert!(tree.is_valid());
    }
}
