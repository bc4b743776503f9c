//! The driving loop shared by the command-line tools: read trees one after
//! another, apply an operation, write the result.

use crate::error::RunError;
use crate::model::Tree;
use crate::newick::NewickParser;
use crate::parser::{ByteParser, ByteSource, InMemoryByteSource, ParsingError};
use log::debug;
use std::io::{self, Write};

/// Name standing for standard input.
pub const STDIN_NAME: &str = "-";

/// Opens the input of a tool: standard input for `"-"`, otherwise the named
/// file. Either is read into memory completely.
///
/// # Errors
/// An I/O [ParsingError] if the input cannot be read.
pub fn open_input(name: &str) -> Result<ByteParser<InMemoryByteSource>, ParsingError> {
    if name == STDIN_NAME {
        ByteParser::from_reader(io::stdin().lock())
    } else {
        ByteParser::from_file(name)
    }
}

/// Parses trees from `byte_parser` in input order and hands each to `op`.
///
/// Whatever `op` returns is written to `out` as one line; `None` writes
/// nothing. A tree's line is written completely or not at all. Output is
/// flushed before returning, also when stopping on an error.
///
/// Returns the number of trees processed.
///
/// # Errors
/// The first [RunError] of parsing, of `op`, or of writing. Trees after the
/// failing one are not processed.
///
/// # Example
/// ```
/// use nwkit::parser::ByteParser;
/// use nwkit::pipeline::process_stream;
///
/// let input = ByteParser::for_str("(B,A);\n(C,(E,D));\n");
/// let mut out = Vec::new();
/// let count = process_stream(input, &mut out, |mut tree| {
///     Ok(Some(nwkit::ops::order_tree(&mut tree)?))
/// })
/// .unwrap();
///
/// assert_eq!(count, 2);
/// assert_eq!(String::from_utf8(out).unwrap(), "(A,B);\n((D,E),C);\n");
/// ```
pub fn process_stream<B, W, F>(
    byte_parser: ByteParser<B>,
    out: &mut W,
    mut op: F,
) -> Result<usize, RunError>
where
    B: ByteSource,
    W: Write,
    F: FnMut(Tree) -> Result<Option<String>, RunError>,
{
    let mut count = 0;
    let run = || -> Result<(), RunError> {
        for tree in NewickParser::new().into_iter(byte_parser) {
            let tree = tree?;
            count += 1;
            debug!("tree #{count}: {} nodes", tree.num_nodes());
            if let Some(mut line) = op(tree)? {
                line.push('\n');
                out.write_all(line.as_bytes())?;
            }
        }
        Ok(())
    };
    let result = run();
    out.flush()?;
    result.map(|()| count)
}
