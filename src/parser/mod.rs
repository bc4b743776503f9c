//! Basic low-level byte parser functionality.
//!
//! Provides the byte-by-byte [ByteParser] the Newick parser is built on,
//! the [ByteSource] abstraction it reads from, the [ParsingError] it reports,
//! and label escaping helpers shared with the Newick writer.
pub mod byte_parser;
pub mod byte_source;
pub mod in_memory_byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use byte_source::ByteSource;
pub use in_memory_byte_source::InMemoryByteSource;
pub use parsing_error::{ParsingError, ParsingErrorType};
