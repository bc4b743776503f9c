//! Where the [ByteParser](crate::parser::ByteParser) gets its bytes from.

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Forward-only cursor over tree input.
///
/// [InMemoryByteSource](crate::parser::InMemoryByteSource) is the one
/// implementation the tools use: tree files and standard input are read
/// completely before the first tree is parsed.
pub trait ByteSource {
    /// Returns the byte under the cursor, `None` at the end.
    fn peek(&self) -> Option<u8>;

    /// Returns the byte under the cursor and moves past it.
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns the input from the cursor on, at most `k` bytes of it.
    fn upcoming(&self, k: usize) -> &[u8];

    /// Byte offset of the cursor.
    fn position(&self) -> usize;

    /// Returns whether all input has been consumed.
    fn is_eof(&self) -> bool {
        self.peek().is_none()
    }
}
