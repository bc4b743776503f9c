//! Matching trees against a pattern tree.
//!
//! A target matches a pattern if, restricted to the pattern's leaf labels,
//! it has the same topology. The target is reduced on a copy:
//!
//! 1. inner labels are removed (only leaf labels take part in matching),
//! 2. labeled nodes whose label is not a pattern leaf label are spliced out,
//! 3. branch lengths are removed,
//! 4. the result is put in canonical order.
//!
//! The reduced target matches if its Newick text equals the pattern's, which
//! has been normalized the same way.

use crate::error::{RunError, TreeError};
use crate::model::{LabelIndex, NodeIndex, Tree};
use crate::newick;
use crate::ops::order::order_tree;
use log::{debug, trace};

// =#========================================================================#=
// SUBGRAPH MATCHER
// =#========================================================================#=
/// Tests trees against a pattern tree.
///
/// # Example
/// ```
/// use nwkit::newick::parse_str;
/// use nwkit::ops::SubgraphMatcher;
///
/// let matcher = SubgraphMatcher::from_newick("((Tamias,Homo),Vulpes);").unwrap();
/// let target = parse_str("(((Homo:1,Pan:1)Hominini:2,Tamias:3)90:1,Vulpes:4);").unwrap();
/// assert!(matcher.is_match(&target).unwrap());
///
/// let other = parse_str("((Homo,Vulpes),(Tamias,Pan));").unwrap();
/// assert!(!matcher.is_match(&other).unwrap());
///
/// let inverse = matcher.with_reverse(true);
/// assert!(inverse.is_match(&other).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SubgraphMatcher {
    /// Normalized pattern tree
    pattern: Tree,
    /// Newick text of the normalized pattern
    pattern_newick: String,
    /// Leaf labels of the pattern
    pattern_labels: LabelIndex<NodeIndex>,
    reverse: bool,
}

impl SubgraphMatcher {
    /// Creates a matcher for `pattern`, normalizing it (inner labels and
    /// branch lengths removed, canonical order).
    ///
    /// Leaf labels are assumed unique; a repeated one is logged as warning
    /// and makes the outcome of matching unspecified.
    ///
    /// # Errors
    /// [RunError] if the pattern's structure is broken or its labels cannot
    /// be indexed.
    pub fn new(mut pattern: Tree) -> Result<Self, RunError> {
        strip_inner_labels(&mut pattern);
        strip_branch_lengths(&mut pattern);
        let pattern_newick = order_tree(&mut pattern)?;
        let pattern_labels = LabelIndex::from_leaves(&pattern)?;
        debug!(
            "pattern {pattern_newick} with {} leaf labels",
            pattern_labels.len()
        );

        Ok(SubgraphMatcher {
            pattern,
            pattern_newick,
            pattern_labels,
            reverse: false,
        })
    }

    /// Parses `pattern` and creates a matcher for it.
    ///
    /// # Errors
    /// [RunError::Parsing] if `pattern` is not a Newick tree, otherwise as
    /// [`new`](Self::new).
    pub fn from_newick(pattern: &str) -> Result<Self, RunError> {
        Self::new(newick::parse_str(pattern)?)
    }

    /// Inverts the verdict of [`is_match`](Self::is_match).
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Returns the normalized pattern.
    pub fn pattern(&self) -> &Tree {
        &self.pattern
    }

    /// Returns the Newick text of the normalized pattern.
    pub fn pattern_newick(&self) -> &str {
        &self.pattern_newick
    }

    /// Returns whether the verdict is inverted.
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Returns a reduced, ordered copy of `target`; `target` itself is not
    /// modified.
    ///
    /// # Errors
    /// [TreeError] if splicing fails, e.g. on a target whose links are broken.
    pub fn reduce(&self, target: &Tree) -> Result<Tree, TreeError> {
        let mut reduced = target.clone();
        strip_inner_labels(&mut reduced);
        self.prune_extra_labels(&mut reduced)?;
        strip_branch_lengths(&mut reduced);
        order_tree(&mut reduced)?;
        Ok(reduced)
    }

    /// Returns whether `target` matches the pattern, inverted in reverse mode.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn is_match(&self, target: &Tree) -> Result<bool, TreeError> {
        let reduced = self.reduce(target)?;
        let reduced_newick = newick::to_newick(&reduced);
        let matched = reduced_newick == self.pattern_newick;
        debug!(
            "reduced target {reduced_newick} {} pattern",
            if matched { "matches" } else { "does not match" }
        );
        Ok(matched != self.reverse)
    }

    /// Splices out every labeled non-root node whose label is not a pattern
    /// leaf label.
    fn prune_extra_labels(&self, tree: &mut Tree) -> Result<(), TreeError> {
        let order = tree.nodes_in_order().to_vec();
        for index in order {
            let Some(node) = tree.get(index) else {
                continue; // spliced out as a single-child parent
            };
            if !node.has_label() || node.is_root() {
                continue;
            }
            if self.pattern_labels.contains_key(node.label()) {
                continue;
            }
            trace!("removing '{}' (not in pattern)", node.label());
            tree.remove_node(index)?;
        }
        Ok(())
    }
}

fn strip_inner_labels(tree: &mut Tree) {
    let order = tree.nodes_in_order().to_vec();
    for index in order {
        let node = &mut tree[index];
        if !node.is_leaf() {
            node.set_label("");
        }
    }
}

fn strip_branch_lengths(tree: &mut Tree) {
    let order = tree.nodes_in_order().to_vec();
    for index in order {
        tree[index].edge_mut().clear_length();
    }
}
