//! Constants for the Newick parser and writer.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Default guess for number of nodes, when unknown
pub(crate) const DEFAULT_NUM_NODES_GUESS: usize = 16;

/// Bytes a branch length may consist of (scientific notation included)
pub(crate) fn is_branch_length_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E')
}
