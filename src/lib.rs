//! Nwkit is a library (and a set of small tools) to restructure rooted,
//! labeled trees given in Newick format.
//!
//! Core functionality provided:
//! - Newick: parse trees one at a time or all at once, with any number of
//!   children per node, labels on any node, and branch lengths kept as written.
//! - Tree model: [Tree] arena with parent back-references and a cached
//!   post-order listing; [LabelIndex] to find nodes by label.
//! - Splicing: remove nodes while keeping the tree rooted and path lengths
//!   from ancestors to descendants unchanged.
//! - Operations:
//!   - [order](ops::order): canonical sibling order, so that trees equal up to
//!     sibling order are written identically
//!   - [SubgraphMatcher](ops::SubgraphMatcher): does a tree, restricted to a
//!     pattern's leaves, have the pattern's topology?
//!   - [Pruner](ops::Pruner): remove (or keep) nodes by label
//!   - [Trimmer](ops::Trimmer): cut a tree at a depth
//!   - [TreeProperties](ops::TreeProperties): type, size, and dichotomies
//!
//! The tools `nw_match`, `nw_prune`, `nw_trim` and `nw_stats` wrap these
//! operations in the [pipeline] loop: read a tree, apply the operation,
//! write the result, next tree.
//!
//! # Example
//!
//! Parse a single Newick string:
//! ```
//! use nwkit::parse_newick_str;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2)90:0.3,C:0.4);").unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//! assert_eq!(tree.num_nodes(), 5);
//! ```
//!
//! Match trees against a pattern:
//! ```
//! use nwkit::{newick, ops::SubgraphMatcher};
//!
//! let matcher = SubgraphMatcher::from_newick("((Tamias,Homo),Vulpes);").unwrap();
//! let trees = newick::NewickParser::new()
//!     .parse_all(nwkit::parser::ByteParser::for_str(
//!         "((Homo,Tamias),(Vulpes,Pan)); ((Homo,Vulpes),Tamias);",
//!     ))
//!     .unwrap();
//! let matching: Vec<_> = trees
//!     .iter()
//!     .filter(|t| matcher.is_match(t).unwrap())
//!     .map(newick::to_newick)
//!     .collect();
//! assert_eq!(matching, ["((Homo,Tamias),(Vulpes,Pan));"]);
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod ops;
pub mod parser;
pub mod pipeline;

pub use error::{LabelIndexError, RunError, TreeError};
pub use model::{Edge, LabelIndex, Node, NodeIndex, Tree};

use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Parses a single Newick string into a [Tree].
///
/// Convenience function, see [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses all trees of a Newick file.
///
/// Convenience function, see [newick::parse_file].
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}
