//! Removing nodes by label.

use crate::error::TreeError;
use crate::model::{LabelIndex, NodeIndex, SpliceOutcome, Tree};
use crate::parser::utils::is_numeric_label;
use log::{debug, warn};

/// Which nodes the listed labels select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Remove the listed nodes.
    #[default]
    Direct,
    /// Keep the listed nodes (and their subtrees), remove the other leaves.
    Reverse,
}

/// Treatment of unlisted inner nodes in [PruneMode::Reverse].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InnerNodes {
    /// Inner nodes are never pruned.
    #[default]
    Keep,
    /// Inner nodes with a non-numeric label are pruned.
    Text,
    /// Inner nodes with any non-empty label are pruned.
    All,
}

/// How a listed node leaves the tree in [PruneMode::Direct].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Removal {
    /// The node and all of its descendants are removed.
    #[default]
    Clade,
    /// Only the node is removed; its children take its place.
    Splice,
}

/// Summary of a pruning pass over one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneReport {
    /// Nodes selected and removed (collapsed single-child parents and the
    /// descendants of removed clades are not counted)
    pub num_removed: usize,
    /// Set if the root changed
    pub new_root: Option<NodeIndex>,
    /// A listed node was kept because it is (or became) the root. Removing
    /// it would leave an empty tree.
    pub kept_listed_root: bool,
}

// =#========================================================================#=
// PRUNER
// =#========================================================================#=
/// Removes nodes selected by label.
///
/// The root and unlabeled nodes are never removed. A parent left with a
/// single child is spliced out.
///
/// # Example
/// ```
/// use nwkit::newick::{parse_str, to_newick};
/// use nwkit::ops::prune::{Pruner, PruneMode};
///
/// let pruner = Pruner::new(["Homininae"]).unwrap();
/// let mut tree = parse_str("(((Homo,Pan)Homininae,Pongo)Hominidae,Hylobates);").unwrap();
/// pruner.prune(&mut tree).unwrap();
/// assert_eq!(to_newick(&tree), "(Pongo,Hylobates);");
///
/// let keep = Pruner::new(["Homo", "Pongo"]).unwrap().with_mode(PruneMode::Reverse);
/// let mut tree = parse_str("(((Homo,Pan)Homininae,Pongo)Hominidae,Hylobates);").unwrap();
/// keep.prune(&mut tree).unwrap();
/// assert_eq!(to_newick(&tree), "(Homo,Pongo)Hominidae;");
/// ```
#[derive(Debug, Clone)]
pub struct Pruner {
    labels: LabelIndex<()>,
    mode: PruneMode,
    inner_nodes: InnerNodes,
    removal: Removal,
}

impl Pruner {
    /// Creates a pruner for the given labels, in direct mode.
    ///
    /// # Errors
    /// [LabelIndexError](crate::error::LabelIndexError) if the labels cannot
    /// be indexed.
    pub fn new<I, S>(labels: I) -> Result<Self, crate::error::LabelIndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Pruner {
            labels: LabelIndex::from_labels(labels)?,
            mode: PruneMode::default(),
            inner_nodes: InnerNodes::default(),
            removal: Removal::default(),
        })
    }

    /// Sets the selection mode.
    pub fn with_mode(mut self, mode: PruneMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the treatment of unlisted inner nodes (reverse mode only).
    pub fn with_inner_nodes(mut self, inner_nodes: InnerNodes) -> Self {
        self.inner_nodes = inner_nodes;
        self
    }

    /// Sets how listed nodes are removed (direct mode only).
    pub fn with_removal(mut self, removal: Removal) -> Self {
        self.removal = removal;
        self
    }

    /// Prunes `tree` in place.
    ///
    /// # Errors
    /// [TreeError] if a removal fails on a tree with broken links.
    pub fn prune(&self, tree: &mut Tree) -> Result<PruneReport, TreeError> {
        let mut report = PruneReport::default();
        // Reverse mode: nodes below a listed node
        let mut protected = vec![false; tree.index_bound()];

        let order: Vec<NodeIndex> = tree.pre_order_iter().map(|n| n.index()).collect();
        for index in order {
            let Some(node) = tree.get(index) else {
                continue; // released with a clade or spliced out
            };
            if let Some(parent) = node.parent() {
                protected[index] = protected[parent];
            }
            if protected[index] {
                continue;
            }
            let listed = self.labels.contains_key(node.label());

            let outcome = match self.mode {
                PruneMode::Direct => {
                    if !listed || !node.has_label() {
                        continue;
                    }
                    if node.is_root() {
                        warn!("not pruning '{}': it is the root", node.label());
                        report.kept_listed_root = true;
                        continue;
                    }
                    debug!("pruning '{}'", node.label());
                    match self.removal {
                        Removal::Clade => tree.remove_subtree(index)?,
                        Removal::Splice => tree.remove_node(index)?,
                    }
                }
                PruneMode::Reverse => {
                    if listed {
                        protected[index] = true;
                        continue;
                    }
                    if node.is_root() || !self.is_unlisted_prunable(node.label(), node.is_leaf()) {
                        continue;
                    }
                    debug!("pruning '{}' (not listed)", node.label());
                    tree.remove_node(index)?
                }
            };

            report.num_removed += 1;
            if let SpliceOutcome::NewRoot(root) = outcome {
                report.new_root = Some(root);
            }
        }
        Ok(report)
    }

    fn is_unlisted_prunable(&self, label: &str, is_leaf: bool) -> bool {
        if label.is_empty() {
            return false;
        }
        if is_leaf {
            return true;
        }
        match self.inner_nodes {
            InnerNodes::Keep => false,
            InnerNodes::Text => !is_numeric_label(label),
            InnerNodes::All => true,
        }
    }
}
