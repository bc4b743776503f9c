//! Newick format parser and writer.
//!
//! This module provides [`NewickParser`] to parse Newick strings into
//! [Tree]s, and [`to_newick`] to render them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses all trees of a file
//! * [`parse_str`] - parses a single tree from a string
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::next_tree`] - parse the next tree, `None` at end of input
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= node ';'`
//! * `node ::= [ '(' node (',' node)* ')' ] [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Labels are unquoted (ended by whitespace or `()[],:;`) or enclosed in
//!   single quotes, with `''` standing for a quote inside
//! * Any node may carry a label; a missing label is the empty label
//! * Whitespace and newlines can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Comments are square brackets and can occur wherever whitespace can
//! * Branch lengths are kept as written, so unmodified trees are written
//!   back with the same numbers

mod defs;
mod parser;
pub mod writer;

pub use self::parser::{NewickIterator, NewickParser};
pub use self::writer::{subtree_to_newick, to_newick, write_newick};

use crate::model::Tree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to a file with a semicolon-separated list of Newick
///   strings; whitespace and `[...]` comments between them are fine
///
/// # Errors
/// [ParsingError] if reading the file fails or a tree is invalid.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string to obtain a [Tree].
///
/// Anything after the terminating `;` is ignored.
///
/// # Example
/// ```
/// use nwkit::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_tree(&mut byte_parser)
}
