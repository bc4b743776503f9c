//! Operations on whole trees.
//!
//! * [order] - canonical sibling order, the basis of tree comparison
//! * [matcher] - [SubgraphMatcher], testing trees against a pattern
//! * [prune] - [Pruner], removing nodes by label
//! * [trim] - [Trimmer], cutting trees at a depth
//! * [stats] - [TreeProperties] of a tree and their output formats

pub mod matcher;
pub mod order;
pub mod prune;
pub mod stats;
pub mod trim;

pub use matcher::SubgraphMatcher;
pub use order::order_tree;
pub use prune::{InnerNodes, PruneMode, PruneReport, Pruner, Removal};
pub use stats::{StatsFormat, TreeProperties, TreeType};
pub use trim::{DepthMode, TrimReport, Trimmer};
