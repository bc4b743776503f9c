//! Provides the rooted tree representation.
//!
//! * [Tree] - arena of [Node]s with a designated root and a cached
//!   post-order listing of its nodes
//! * [NodeIndex] - handle used to refer to nodes of a tree
//! * [PostOrderIter] and [PreOrderIter] - stack-based traversals

use crate::error::TreeError;
use crate::model::node::{Edge, Node};
use std::cell::OnceCell;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: NodeIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted, labeled tree using the arena pattern on [Node].
///
/// Nodes are stored in a vector and referenced by [NodeIndex]. Removing a
/// node releases its slot (the slot becomes `None`); indices of the remaining
/// nodes never change, so indices collected before a removal stay valid for
/// every node that survives it.
///
/// # Structure
/// - Children are ordered; any number of children is allowed.
/// - Labels may be attached to any node; the empty label means unlabeled.
/// - Every node owns the [Edge] to its parent, holding the branch length.
///
/// # Order listing
/// [`nodes_in_order`](Tree::nodes_in_order) returns all nodes in post-order
/// (children before their parent, root last). It is computed on demand and
/// cached; every topology change drops the cache and bumps
/// [`generation`](Tree::generation), so a listing is never stale.
///
/// # Construction
/// Add nodes bottom-up with [`add_leaf`](Tree::add_leaf) and
/// [`add_internal`](Tree::add_internal), then finish with
/// [`add_root`](Tree::add_root). Test validity with [`Tree::is_valid()`].
///
/// ```
/// use nwkit::model::{Edge, Tree};
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A", Edge::from_text("1"));
/// let b = tree.add_leaf("B", Edge::from_text("2"));
/// let root = tree.add_root(vec![a, b], "", Edge::without_length());
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.nodes_in_order(), &[a, b, root]);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Node slots of this tree (arena pattern); `None` for released nodes
    nodes: Vec<Option<Node>>,

    /// Number of live nodes
    num_nodes: usize,

    /// Index of the root of this tree
    root_index: NodeIndex,

    /// Cached post-order listing of the live nodes
    order: OnceCell<Vec<NodeIndex>>,

    /// Incremented on every topology change
    generation: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Construction, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new, empty tree with room for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(num_nodes),
            num_nodes: 0,
            root_index: NO_ROOT_SET_INDEX,
            order: OnceCell::new(),
            generation: 0,
        }
    }

    /// Adds a leaf, returning its index.
    ///
    /// # Arguments
    /// * `label` - Label of the leaf, may be empty
    /// * `edge` - Edge to the (future) parent
    pub fn add_leaf(&mut self, label: impl Into<String>, edge: Edge) -> NodeIndex {
        self.push_node(Vec::new(), label.into(), edge)
    }

    /// Adds an internal node above the given children, returning its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds or refers to a released node.
    pub fn add_internal(
        &mut self,
        children: Vec<NodeIndex>,
        label: impl Into<String>,
        edge: Edge,
    ) -> NodeIndex {
        self.push_node(children, label.into(), edge)
    }

    /// Adds the root above the given children (none for a single-node tree),
    /// returning its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds or refers to a released node.
    pub fn add_root(
        &mut self,
        children: Vec<NodeIndex>,
        label: impl Into<String>,
        edge: Edge,
    ) -> NodeIndex {
        let index = self.push_node(children, label.into(), edge);
        self.root_index = index;
        index
    }

    fn push_node(&mut self, children: Vec<NodeIndex>, label: String, edge: Edge) -> NodeIndex {
        let index = self.nodes.len();
        let mut node = Node::new(index, label, edge);
        for &child in &children {
            self[child].set_parent(Some(index));
        }
        *node.children_mut() = children;

        self.nodes.push(Some(node));
        self.num_nodes += 1;
        self.topology_changed();
        index
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if the root hasn't been set.
    pub fn root(&self) -> &Node {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        self.root_index
    }

    /// Returns the node at `index`, or `None` if there is no live node there.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index).and_then(|slot| slot.as_ref())
    }

    /// Returns the node at `index` mutably, or `None` if there is no live node there.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `index` refers to a live node of this tree.
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.get(index).is_some()
    }

    /// Returns the number of live nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of nodes with children.
    pub fn num_internal(&self) -> usize {
        self.nodes().filter(|n| !n.is_leaf()).count()
    }

    /// Returns one past the largest index ever handed out; side tables
    /// indexed by [NodeIndex] need this length.
    pub fn index_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over all live nodes in arena order (not a traversal order).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Iterates over the labels of all leaves, in post-order.
    pub fn leaf_labels(&self) -> impl Iterator<Item = &str> {
        self.post_order_iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.label())
    }

    /// Returns the number of ancestor edges between the root and `index`.
    ///
    /// # Errors
    /// [TreeError::NodeNotFound] if `index` is not a live node, and
    /// [TreeError::Cycle] if following parents never reaches the root.
    pub fn depth_of(&self, index: NodeIndex) -> Result<usize, TreeError> {
        let mut current = self.get(index).ok_or(TreeError::NodeNotFound(index))?;
        let mut depth = 0;
        while let Some(parent) = current.parent() {
            depth += 1;
            if depth > self.num_nodes {
                return Err(TreeError::Cycle(index));
            }
            current = self.get(parent).ok_or(TreeError::NodeNotFound(parent))?;
        }
        Ok(depth)
    }

    /// Returns the sum of branch lengths between the root and `index`
    /// (missing lengths count as zero).
    ///
    /// # Errors
    /// Same as [`depth_of`](Tree::depth_of).
    pub fn distance_from_root(&self, index: NodeIndex) -> Result<f64, TreeError> {
        let mut current = self.get(index).ok_or(TreeError::NodeNotFound(index))?;
        let mut distance = 0.0;
        let mut steps = 0;
        while let Some(parent) = current.parent() {
            distance += current.edge().length_or_zero();
            steps += 1;
            if steps > self.num_nodes {
                return Err(TreeError::Cycle(index));
            }
            current = self.get(parent).ok_or(TreeError::NodeNotFound(parent))?;
        }
        Ok(distance)
    }
}

// ============================================================================
// Order listing
// ============================================================================
impl Tree {
    /// Returns all live nodes in post-order: every node after all of its
    /// descendants, root last, siblings in child order.
    ///
    /// The listing is cached until the topology changes. Callers that mutate
    /// the tree while walking it take a copy (`to_vec()`) and skip indices
    /// that are no longer [`contains`](Tree::contains)ed.
    pub fn nodes_in_order(&self) -> &[NodeIndex] {
        self.order
            .get_or_init(|| self.post_order_iter().map(|n| n.index()).collect())
    }

    /// Returns a counter that changes whenever the topology changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops the cached order listing; called by every topology change.
    pub(crate) fn topology_changed(&mut self) {
        self.order.take();
        self.generation += 1;
    }

    /// Reorders the children of `index` with a stable sort.
    ///
    /// # Errors
    /// [TreeError::NodeNotFound] if `index` is not a live node.
    pub fn sort_children_by<F>(&mut self, index: NodeIndex, compare: F) -> Result<(), TreeError>
    where
        F: FnMut(&NodeIndex, &NodeIndex) -> std::cmp::Ordering,
    {
        let node = self.get_mut(index).ok_or(TreeError::NodeNotFound(index))?;
        node.children_mut().sort_by(compare);
        self.topology_changed();
        Ok(())
    }

    // --- Slot management, reserved to the splicer ---

    pub(crate) fn set_root_index(&mut self, index: NodeIndex) {
        self.root_index = index;
        self.topology_changed();
    }

    /// Releases the slot of `index`; links pointing to it must already be gone.
    pub(crate) fn release(&mut self, index: NodeIndex) -> Option<Node> {
        let node = self.nodes.get_mut(index)?.take()?;
        self.num_nodes -= 1;
        self.topology_changed();
        Some(node)
    }
}

// ============================================================================
// Validation
// ============================================================================
impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set, live, and has no parent
    /// - All node indices match their position in the arena
    /// - Every child points back to its parent, every parent lists its child
    /// - Every live node is reachable from the root exactly once (no cycles)
    pub fn validate(&self) -> Result<(), TreeError> {
        if !self.is_root_set() {
            return Err(TreeError::RootNotSet);
        }
        let root = self
            .get(self.root_index)
            .ok_or(TreeError::NodeNotFound(self.root_index))?;
        if !root.is_root() {
            return Err(TreeError::InconsistentLink(self.root_index));
        }

        for (index, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot else { continue };
            if node.index() != index {
                return Err(TreeError::InconsistentLink(index));
            }
            for &child in node.children() {
                let child_node = self.get(child).ok_or(TreeError::NodeNotFound(child))?;
                if child_node.parent() != Some(index) {
                    return Err(TreeError::InconsistentLink(child));
                }
            }
            match node.parent() {
                None if index != self.root_index => {
                    return Err(TreeError::InconsistentLink(index));
                }
                Some(parent) => {
                    let parent_node = self.get(parent).ok_or(TreeError::NodeNotFound(parent))?;
                    if !parent_node.children().contains(&index) {
                        return Err(TreeError::InconsistentLink(index));
                    }
                }
                None => {}
            }
        }

        // Walk from the root; seeing a node twice means a cycle or a shared child
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root_index];
        let mut reached = 0;
        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                return Err(TreeError::Cycle(index));
            }
            reached += 1;
            stack.extend_from_slice(self[index].children());
        }
        if reached != self.num_nodes {
            return Err(TreeError::InconsistentLink(self.root_index));
        }

        Ok(())
    }

    /// Returns `true` if [`validate`](Tree::validate) finds no violation.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    /// # Panics
    /// Panics if `index` is out of bounds or the node has been released.
    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.nodes.get(index) {
            Some(Some(node)) => node,
            _ => panic!("no live node at index {index}"),
        }
    }
}

impl std::ops::IndexMut<NodeIndex> for Tree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match self.nodes.get_mut(index) {
            Some(Some(node)) => node,
            _ => panic!("no live node at index {index}"),
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// # Example
    /// ```
    /// use nwkit::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)X,C)R;").unwrap();
    /// let labels: Vec<_> = tree.post_order_iter().map(|n| n.label()).collect();
    /// assert_eq!(labels, ["A", "B", "X", "C", "R"]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use nwkit::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)X,C)R;").unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().map(|n| n.label()).collect();
    /// assert_eq!(labels, ["R", "X", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses an explicit stack, so deep trees do not exhaust the call stack.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() && tree.contains(tree.root_index) {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                return Some(node);
            }

            self.stack.push((index, true));
            // Push children in reverse, so the first child is processed first
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() && tree.contains(tree.root_index) {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
