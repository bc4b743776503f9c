//! Cursor-level reading of Newick text: single bytes, whitespace, `[...]`
//! comments, and labels (bare or in single quotes).
//!
//! The [Newick parser](crate::newick::NewickParser) is written on top of
//! [ByteParser] and never touches a [ByteSource] directly.

use crate::parser::byte_source::ByteSource;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use crate::parser::parsing_error::ParsingError;
use std::io::Read;
use std::path::Path;

const QUOTE: u8 = b'\'';
const COMMENT_OPEN: u8 = b'[';
const COMMENT_CLOSE: u8 = b']';

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// Reads Newick input byte by byte.
///
/// Structure bytes are ASCII; any other byte inside a label is kept, and the
/// label is decoded as UTF-8 (lossily) once complete.
///
/// # Example
/// ```
/// use nwkit::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [a comment] (A,B);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.peek(), Some(b'('));
/// ```
#[derive(Debug)]
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Reads from a copy of `input`.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from(input))
    }

    /// Reads from the contents of a file.
    ///
    /// # Errors
    /// An I/O [ParsingError] if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }

    /// Reads from everything `reader` yields until its end.
    ///
    /// # Errors
    /// An I/O [ParsingError] if reading fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_reader(reader)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Current byte, not consumed; `None` at the end of input.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Current byte, consumed.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes `ch` if it is the current byte; returns whether it was.
    pub fn consume_if(&mut self, ch: u8) -> bool {
        let matched = self.peek_is(ch);
        if matched {
            self.next_byte();
        }
        matched
    }

    /// Consumes bytes through the next `target` (inclusive). Returns `false`
    /// if the input ended without one.
    pub fn consume_until(&mut self, target: u8) -> bool {
        std::iter::from_fn(|| self.next_byte()).any(|b| b == target)
    }

    /// Consumes spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_blank) {
            self.next_byte();
        }
    }

    /// Consumes one `[...]` comment if the cursor is on its opening bracket.
    /// Comments do not nest.
    ///
    /// # Returns
    /// Whether a comment was consumed.
    ///
    /// # Errors
    /// [UnclosedComment](crate::parser::ParsingErrorType::UnclosedComment)
    /// if the closing bracket is missing.
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(COMMENT_OPEN) {
            return Ok(false);
        }
        if self.consume_until(COMMENT_CLOSE) {
            Ok(true)
        } else {
            Err(ParsingError::unclosed_comment(self))
        }
    }

    /// Consumes any mix of whitespace and comments.
    ///
    /// # Errors
    /// See [`skip_comment`](Self::skip_comment).
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                return Ok(());
            }
        }
    }

    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Up to `k` bytes from the cursor on, for error messages.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.upcoming(k)).into_owned()
    }

    /// Reads a label, quoted or bare, after skipping whitespace and comments.
    /// No label at all yields the empty string.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end a bare label
    ///
    /// # Errors
    /// An unclosed comment before the label or an unclosed quote.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;
        if self.peek_is(QUOTE) {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Reads a label in single quotes, the cursor being on the opening one.
    /// A doubled quote inside stands for one quote: `'Wilson''s'` reads as
    /// `Wilson's`.
    ///
    /// # Errors
    /// [UnclosedQuote](crate::parser::ParsingErrorType::UnclosedQuote) if the
    /// input ends first.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte();

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                None => return Err(ParsingError::unclosed_quote(self)),
                Some(QUOTE) if self.consume_if(QUOTE) => label.push(QUOTE),
                Some(QUOTE) => break,
                Some(b) => label.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Reads a bare label up to the first of `delimiters` or the end of input.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = Vec::new();
        while let Some(b) = self.peek().filter(|b| !delimiters.contains(b)) {
            label.push(b);
            self.next_byte();
        }
        String::from_utf8_lossy(&label).into_owned()
    }
}
