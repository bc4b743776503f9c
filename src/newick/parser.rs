//! Reading Newick trees from a [ByteParser].
//!
//! [NewickParser] reads one tree, all trees, or hands out a lazy
//! [NewickIterator] for stream processing.

use crate::model::{Edge, NodeIndex, Tree};
use crate::newick::defs::{is_branch_length_byte, DEFAULT_NUM_NODES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use log::trace;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick trees with any number of children per
/// node and labels on any node.
///
/// # Configuration
/// * [`with_num_nodes(num_nodes)`](Self::with_num_nodes)
///     - Expected number of nodes per tree, used to pre-allocate the arena.
///       Otherwise it is taken from the previously parsed tree.
///
/// # Parsing
/// * [`next_tree`](Self::next_tree): Parse the next tree, if any
/// * [`parse_tree`](Self::parse_tree): Parse exactly one tree
/// * [`parse_all`](Self::parse_all): Parse all trees eagerly
/// * [`into_iter`](Self::into_iter): Parse trees lazily
///
/// # Example
/// ```
/// use nwkit::newick::NewickParser;
/// use nwkit::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((Tamias,Homo)Euarchontoglires:0.5,Vulpes);\n(A,B);");
/// let mut newick_parser = NewickParser::new();
///
/// let first = newick_parser.next_tree(&mut byte_parser).unwrap().unwrap();
/// assert_eq!(first.num_leaves(), 3);
/// let second = newick_parser.next_tree(&mut byte_parser).unwrap().unwrap();
/// assert_eq!(second.num_leaves(), 2);
/// assert!(newick_parser.next_tree(&mut byte_parser).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_nodes: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_nodes: DEFAULT_NUM_NODES_GUESS,
        }
    }

    /// Sets the expected number of nodes in each parsed tree.
    pub fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Turns the parser into a lazy iterator over the trees of `byte_parser`.
    ///
    /// The iterator ends after the last tree, or right after yielding the
    /// first error.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Reads every remaining tree of `byte_parser`.
    ///
    /// # Errors
    /// Returns the first [ParsingError] encountered.
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        while let Some(tree) = self.next_tree(&mut byte_parser)? {
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Parses the next tree, or returns `Ok(None)` if only whitespace and
    /// comments are left.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the next tree is malformed or truncated.
    pub fn next_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<Tree>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Ok(None);
        }
        self.parse_tree(parser).map(Some)
    }

    /// Parses a single Newick tree, terminated by `;`.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the input is not a valid Newick tree,
    /// including empty input.
    pub fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let start = parser.position();
        let mut tree = Tree::with_capacity(self.num_nodes);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }
        let root = self.parse_node(&mut tree, parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(Self::unexpected(parser, "';' at end of tree"));
        }
        tree.set_root_index(root);

        trace!(
            "parsed tree with {} nodes (bytes {start}..{})",
            tree.num_nodes(),
            parser.position()
        );
        self.num_nodes = tree.num_nodes();
        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a node with its subtree and adds it to the tree:
    /// - `[(children)] [label] [:branch_length]`
    ///
    /// # Returns
    /// - index of the parsed node
    /// - [ParsingError] on malformed input
    fn parse_node<B: ByteSource>(
        &mut self,
        tree: &mut Tree,
        parser: &mut ByteParser<B>,
    ) -> Result<NodeIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        let children = if parser.peek_is(b'(') {
            self.parse_children(tree, parser)?
        } else {
            Vec::new()
        };

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let edge = Self::parse_branch_length(parser)?;

        let index = if children.is_empty() {
            tree.add_leaf(label, edge)
        } else {
            tree.add_internal(children, label, edge)
        };
        Ok(index)
    }

    /// Parses `(child, child, ...)` and returns the children's indices.
    /// - Cursor is on the opening `(`
    fn parse_children<B: ByteSource>(
        &mut self,
        tree: &mut Tree,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<NodeIndex>, ParsingError> {
        parser.next_byte(); // consume '('

        let mut children = Vec::new();
        loop {
            children.push(self.parse_node(tree, parser)?);

            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b',') {
                continue;
            }
            if parser.consume_if(b')') {
                return Ok(children);
            }
            return Err(Self::unexpected(parser, "',' or ')' after child"));
        }
    }

    /// Reads an optional `:length`; comments may surround the colon.
    /// The text is kept as written (`1.5e-10`, `0.10`) next to its value.
    fn parse_branch_length<B: ByteSource>(
        parser: &mut ByteParser<B>,
    ) -> Result<Edge, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(Edge::without_length());
        }
        parser.skip_comment_and_whitespace()?;

        let mut text = String::new();
        while let Some(b) = parser.peek() {
            if !is_branch_length_byte(b) {
                break;
            }
            text.push(char::from(b));
            parser.next_byte();
        }

        if text.parse::<f64>().is_err() {
            if text.is_empty() && parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {text:?}"),
            ));
        }
        Ok(Edge::from_text(text))
    }

    fn unexpected<B: ByteSource>(parser: &ByteParser<B>, expected: &str) -> ParsingError {
        match parser.peek() {
            None => ParsingError::unexpected_eof(parser),
            Some(b) => ParsingError::invalid_newick_string(
                parser,
                format!("Expected {expected} but found {:?}", char::from(b)),
            ),
        }
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================$=
/// Lazy stream of trees, from [NewickParser::into_iter()].
///
/// Yields `Result<Tree, ParsingError>` for each tree and stops after an error.
pub struct NewickIterator<B: ByteSource> {
    parser: NewickParser,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.next_tree(&mut self.byte_parser) {
            Ok(Some(tree)) => Some(Ok(tree)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
