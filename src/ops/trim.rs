//! Cutting trees at a given depth.

use crate::error::TreeError;
use crate::model::{NodeIndex, Tree};
use log::debug;

/// How the depth of a node is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Sum of branch lengths from the root (missing lengths count as zero).
    #[default]
    Distance,
    /// Number of ancestors (edges from the root).
    Ancestors,
}

/// Depth bookkeeping of a node during one trimming pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DepthData {
    trimmed: bool,
    distance_depth: f64,
    ancestry_depth: usize,
}

/// Summary of a trimming pass over one tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimReport {
    /// Nodes at which the tree was cut, in pre-order
    pub trimmed: Vec<NodeIndex>,
    /// Number of nodes discarded below them
    pub num_discarded: usize,
}

// =#========================================================================#=
// TRIMMER
// =#========================================================================#=
/// Cuts a tree so that no node is deeper than a threshold.
///
/// Nodes are visited top-down. The first node on each path whose depth
/// exceeds the threshold becomes a leaf: its descendants are discarded and,
/// in [DepthMode::Distance], its edge is shortened by the excess so the cut
/// falls exactly on the threshold. Its label is kept.
///
/// # Example
/// ```
/// use nwkit::newick::{parse_str, to_newick};
/// use nwkit::ops::trim::Trimmer;
///
/// let mut tree = parse_str("((A:1,B:3)X:2,C:1);").unwrap();
/// Trimmer::new(2.5).trim(&mut tree).unwrap();
/// assert_eq!(to_newick(&tree), "((A:0.5,B:0.5)X:2,C:1);");
///
/// Trimmer::new(1.0).trim(&mut tree).unwrap();
/// assert_eq!(to_newick(&tree), "(X:1,C:1);");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trimmer {
    threshold: f64,
    mode: DepthMode,
}

impl Trimmer {
    /// Creates a trimmer cutting at `threshold`, measuring distance.
    pub fn new(threshold: f64) -> Self {
        Trimmer {
            threshold,
            mode: DepthMode::default(),
        }
    }

    /// Sets how depth is measured.
    pub fn with_mode(mut self, mode: DepthMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the depth mode.
    pub fn mode(&self) -> DepthMode {
        self.mode
    }

    /// Trims `tree` in place.
    ///
    /// # Errors
    /// [TreeError] if the tree's links are broken.
    pub fn trim(&self, tree: &mut Tree) -> Result<TrimReport, TreeError> {
        let mut report = TrimReport::default();
        let order: Vec<(NodeIndex, Option<NodeIndex>)> = tree
            .pre_order_iter()
            .map(|n| (n.index(), n.parent()))
            .collect();
        let mut depths = vec![DepthData::default(); tree.index_bound()];

        // Root keeps zero depths
        for &(index, parent) in order.iter().skip(1) {
            let parent = parent.ok_or(TreeError::InconsistentLink(index))?;
            let parent_data = depths[parent];

            if parent_data.trimmed {
                // Released together with the parent's descendants
                depths[index].trimmed = true;
                continue;
            }

            let node = tree.get(index).ok_or(TreeError::NodeNotFound(index))?;
            let edge_length = node.edge().length_or_zero();
            let data = DepthData {
                trimmed: false,
                distance_depth: parent_data.distance_depth + edge_length,
                ancestry_depth: parent_data.ancestry_depth + 1,
            };
            depths[index] = data;

            let exceeds = match self.mode {
                DepthMode::Distance => data.distance_depth > self.threshold,
                DepthMode::Ancestors => data.ancestry_depth as f64 > self.threshold,
            };
            if !exceeds {
                continue;
            }

            if self.mode == DepthMode::Distance {
                let excess = data.distance_depth - self.threshold;
                tree[index].edge_mut().set_length(edge_length - excess);
            }
            let discarded = tree.discard_descendants(index)?;
            debug!(
                "trimmed node {index} '{}' at depth {}, discarding {discarded} nodes",
                tree[index].label(),
                data.distance_depth
            );
            depths[index].trimmed = true;
            report.trimmed.push(index);
            report.num_discarded += discarded;
        }
        Ok(report)
    }
}
