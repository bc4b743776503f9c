//! Error types of the tree model, the label index, and the stream pipeline.
//!
//! Parsing errors live with the parser ([ParsingError]); everything else
//! that can fail is declared here with `thiserror`.

use crate::model::tree::NodeIndex;
use crate::parser::ParsingError;
use thiserror::Error;

/// Errors raised by structural operations on a [Tree](crate::model::Tree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no live node at index {0}")]
    NodeNotFound(NodeIndex),

    #[error("removing the only node would leave an empty tree")]
    TreeBecameEmpty,

    #[error("cannot remove a root with {num_children} children: the new root would be ambiguous")]
    AmbiguousRoot { num_children: usize },

    #[error("node {0} is reached twice from the root (cycle or shared child)")]
    Cycle(NodeIndex),

    #[error("parent and child references of node {0} do not match")]
    InconsistentLink(NodeIndex),

    #[error("tree has no root")]
    RootNotSet,
}

/// Errors raised by the [LabelIndex](crate::model::LabelIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelIndexError {
    #[error("could not allocate {requested} bins for the label index")]
    Allocation { requested: usize },
}

/// Errors surfacing while processing a stream of trees.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    LabelIndex(#[from] LabelIndexError),

    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}
