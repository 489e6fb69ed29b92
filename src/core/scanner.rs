//! Positional scanning over the source buffer using memchr
//!
//! The scanner owns the parse cursor. Every search is bounded by the buffer
//! length: a search that finds nothing returns `None` instead of running off
//! the end.

use memchr::{memchr, memchr2, memchr3, memmem};

/// Cursor over a markup buffer
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Total input length
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advance by n bytes, never past the end
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && is_whitespace(self.input[self.pos]) {
            self.pos += 1;
        }
    }

    /// Find next '<' at or after the current position
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        self.find_byte(b'<')
    }

    /// Move to the next '<', or to the end of input if there is none
    pub fn go_next_tag(&mut self) {
        self.pos = self.find_tag_start().unwrap_or(self.input.len());
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find the first byte at or after `from` that belongs to `stops`
    pub fn find_any_from(&self, from: usize, stops: &[u8]) -> Option<usize> {
        let hay = self.input.get(from..)?;
        let found = match *stops {
            [] => None,
            [a] => memchr(a, hay),
            [a, b] => memchr2(a, b, hay),
            [a, b, c] => memchr3(a, b, c, hay),
            _ => hay.iter().position(|b| stops.contains(b)),
        };
        found.map(|i| from + i)
    }

    /// Feature extraction primitive
    ///
    /// The cursor sits on a delimiter. Returns the bytes strictly between that
    /// delimiter and the first stop byte after it, and leaves the cursor on
    /// the stop byte. Returns `None` (cursor unchanged) when no stop byte
    /// occurs before the end of input.
    pub fn extract(&mut self, stops: &[u8]) -> Option<&'a [u8]> {
        let start = self.pos + 1;
        let end = self.find_any_from(start, stops)?;
        self.pos = end;
        Some(&self.input[start..end])
    }
}

/// Whitespace as accepted between markup constructs
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
