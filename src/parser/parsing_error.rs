//! Errors reported while reading Newick input.
//!
//! A [ParsingError] pairs what went wrong ([ParsingErrorType]) with where:
//! the byte offset and a short excerpt of the input that follows.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Bytes of upcoming input quoted in an error
const CONTEXT_BYTES: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("cannot read input: {0}")]
    IoError(String),

    #[error("input ends inside a tree")]
    UnexpectedEOF,

    #[error("'[' without closing ']'")]
    UnclosedComment,

    #[error("quoted label without closing quote")]
    UnclosedQuote,

    #[error("{0}")]
    InvalidNewickString(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Error raised by [ByteParser] and the Newick parser.
///
/// ```
/// use nwkit::newick::parse_str;
///
/// let err = parse_str("(A,B));").unwrap_err();
/// assert_eq!(err.position(), 5);
/// assert_eq!(
///     err.to_string(),
///     "Expected ';' at end of tree but found ')' at byte 5, before \");\""
/// );
/// ```
#[derive(Error, Debug)]
#[error("{kind} at byte {position}{}", excerpt(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

fn excerpt(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(", before {context:?}")
    }
}

impl ParsingError {
    /// Error of `kind` at the parser's current position.
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        ParsingError {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(CONTEXT_BYTES),
        }
    }

    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    pub fn unclosed_quote<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedQuote, parser)
    }

    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Byte offset at which the error was detected (0 for I/O errors).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Input following the error position; may be empty.
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}
