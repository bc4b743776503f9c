//! Tree model: the [Tree] arena, its [Node]s and [Edge]s, node removal, and
//! the [LabelIndex] used to find nodes by label.
//!
//! Nodes never hold references to each other. Parent and children are
//! [NodeIndex] values into the owning tree, and only the tree (while
//! building) and the splicing methods in [splice] rewire them.

/// Label-to-value hash table
pub mod label_index;
/// Nodes and branch-length carrying edges
pub mod node;
/// Node removal preserving path lengths
pub mod splice;
/// Arena tree, traversals, order listing
pub mod tree;

pub use label_index::LabelIndex;
pub use node::{Edge, Node};
pub use splice::SpliceOutcome;
pub use tree::{NodeIndex, PostOrderIter, PreOrderIter, Tree};
