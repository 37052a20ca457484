//! Character sources and the pushback parse context.
//!
//! This module provides the `ParseContext` struct which maintains position
//! state while the parser traverses a character stream. It supports two
//! characters of pushback, tracks line numbers, and retains recent line
//! buffers so parse errors can point at the offending column.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::str::Chars;

use crate::chars::is_unicode_linespace;
use crate::error::{KdlError, Result};

/// How many characters may be pushed back at once.
const PUSHBACK_DEPTH: usize = 2;

/// How many line buffers are retained, counting the current line. Two
/// characters of pushback can cross at most two line breaks, so three lines
/// always suffice to restore state.
const RETAINED_LINES: usize = 3;

/// A source of decoded characters for the parser.
pub trait CharSource {
    /// Returns the next character, or `None` at end of input.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Character source over an in-memory string.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source over the given string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Character source decoding UTF-8 incrementally from a reader.
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a source over the given reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let len = match first {
            0x00..=0x7F => return Ok(Some(first as char)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "invalid UTF-8 leading byte",
                ))
            }
        };
        let mut buf = [first, 0, 0, 0];
        self.inner.read_exact(&mut buf[1..len])?;
        let s = std::str::from_utf8(&buf[..len])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(s.chars().next())
    }
}

/// Position-tracking wrapper around a character source.
///
/// The context supports `read`, `peek`, and up to two characters of
/// `unread`. Reading a line-space character advances the line counter and
/// rotates the line buffer; unreading one restores the previous buffer.
/// Producing an error location invalidates the context; any use after that
/// is a programmer error reported as [`KdlError::Internal`].
pub struct ParseContext<S> {
    source: S,
    pushback: Vec<char>,
    line_number: usize,
    current_line: String,
    previous_lines: VecDeque<String>,
    invalidated: bool,
}

impl<S: CharSource> ParseContext<S> {
    /// Creates a context over the given character source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushback: Vec::with_capacity(PUSHBACK_DEPTH),
            line_number: 1,
            current_line: String::new(),
            previous_lines: VecDeque::with_capacity(RETAINED_LINES - 1),
            invalidated: false,
        }
    }

    fn check_valid(&self) -> Result<()> {
        if self.invalidated {
            return Err(KdlError::internal("parse context used after invalidation"));
        }
        Ok(())
    }

    /// Consumes and returns the next character, or `None` at end of input.
    pub fn read(&mut self) -> Result<Option<char>> {
        self.check_valid()?;
        let c = match self.pushback.pop() {
            Some(c) => Some(c),
            None => self.source.next_char()?,
        };
        if let Some(c) = c {
            if is_unicode_linespace(c) {
                self.previous_lines
                    .push_back(std::mem::take(&mut self.current_line));
                if self.previous_lines.len() > RETAINED_LINES - 1 {
                    self.previous_lines.pop_front();
                }
                self.line_number += 1;
            } else {
                self.current_line.push(c);
            }
        }
        Ok(c)
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Result<Option<char>> {
        self.check_valid()?;
        if let Some(&c) = self.pushback.last() {
            return Ok(Some(c));
        }
        let c = self.source.next_char()?;
        if let Some(c) = c {
            self.pushback.push(c);
        }
        Ok(c)
    }

    /// Pushes a previously read character back onto the stream.
    pub fn unread(&mut self, c: char) -> Result<()> {
        self.check_valid()?;
        if self.pushback.len() >= PUSHBACK_DEPTH {
            return Err(KdlError::internal("pushback buffer exceeded"));
        }
        if is_unicode_linespace(c) {
            self.line_number -= 1;
            self.current_line = self.previous_lines.pop_back().unwrap_or_default();
        } else {
            self.current_line.pop();
        }
        self.pushback.push(c);
        Ok(())
    }

    /// Returns the current 1-based line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the remainder of the current line, invalidates the context, and
    /// returns a location snapshot with a caret under the offending column.
    pub fn error_location(&mut self) -> Result<String> {
        self.check_valid()?;
        self.invalidated = true;

        let caret = self.current_line.chars().count().saturating_sub(1);
        loop {
            let next = match self.pushback.pop() {
                Some(c) => Some(c),
                None => self.source.next_char().unwrap_or(None),
            };
            match next {
                Some(c) if !is_unicode_linespace(c) => self.current_line.push(c),
                _ => break,
            }
        }

        Ok(format!(
            "Line {}:\n{}\n{}^",
            self.line_number,
            self.current_line,
            "-".repeat(caret)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(input: &str) -> ParseContext<StrSource<'_>> {
        ParseContext::new(StrSource::new(input))
    }

    #[test]
    fn test_read_and_eof() {
        let mut ctx = context("ab");
        assert_eq!(ctx.read().unwrap(), Some('a'));
        assert_eq!(ctx.read().unwrap(), Some('b'));
        assert_eq!(ctx.read().unwrap(), None);
        assert_eq!(ctx.read().unwrap(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut ctx = context("xy");
        assert_eq!(ctx.peek().unwrap(), Some('x'));
        assert_eq!(ctx.peek().unwrap(), Some('x'));
        assert_eq!(ctx.read().unwrap(), Some('x'));
        assert_eq!(ctx.read().unwrap(), Some('y'));
    }

    #[test]
    fn test_unread_restores_order() {
        let mut ctx = context("abc");
        let a = ctx.read().unwrap().unwrap();
        let b = ctx.read().unwrap().unwrap();
        ctx.unread(b).unwrap();
        ctx.unread(a).unwrap();
        assert_eq!(ctx.read().unwrap(), Some('a'));
        assert_eq!(ctx.read().unwrap(), Some('b'));
        assert_eq!(ctx.read().unwrap(), Some('c'));
    }

    #[test]
    fn test_unread_depth_is_bounded() {
        let mut ctx = context("abc");
        let a = ctx.read().unwrap().unwrap();
        let b = ctx.read().unwrap().unwrap();
        let c = ctx.read().unwrap().unwrap();
        ctx.unread(c).unwrap();
        ctx.unread(b).unwrap();
        let err = ctx.unread(a).unwrap_err();
        assert!(matches!(err, KdlError::Internal(_)));
    }

    #[test]
    fn test_line_tracking() {
        let mut ctx = context("a\nb\nc");
        assert_eq!(ctx.line_number(), 1);
        ctx.read().unwrap();
        ctx.read().unwrap();
        assert_eq!(ctx.line_number(), 2);
        ctx.read().unwrap();
        ctx.read().unwrap();
        assert_eq!(ctx.line_number(), 3);
    }

    #[test]
    fn test_unread_linespace_restores_line() {
        let mut ctx = context("ab\ncd");
        ctx.read().unwrap();
        ctx.read().unwrap();
        let newline = ctx.read().unwrap().unwrap();
        assert_eq!(ctx.line_number(), 2);
        ctx.unread(newline).unwrap();
        assert_eq!(ctx.line_number(), 1);
        let location = ctx.error_location().unwrap();
        assert!(location.starts_with("Line 1:\nab"));
    }

    #[test]
    fn test_error_location_format() {
        let mut ctx = context("node !x rest\nnext");
        for _ in 0..6 {
            ctx.read().unwrap();
        }
        let location = ctx.error_location().unwrap();
        assert_eq!(location, "Line 1:\nnode !x rest\n-----^");
    }

    #[test]
    fn test_error_location_includes_peeked_char() {
        let mut ctx = context("ab");
        ctx.read().unwrap();
        ctx.peek().unwrap();
        let location = ctx.error_location().unwrap();
        assert_eq!(location, "Line 1:\nab\n^");
    }

    #[test]
    fn test_invalidated_context_rejects_use() {
        let mut ctx = context("a");
        ctx.error_location().unwrap();
        assert!(matches!(ctx.read(), Err(KdlError::Internal(_))));
        assert!(matches!(ctx.peek(), Err(KdlError::Internal(_))));
        assert!(matches!(ctx.unread('a'), Err(KdlError::Internal(_))));
        assert!(matches!(ctx.error_location(), Err(KdlError::Internal(_))));
    }

    #[test]
    fn test_reader_source_decodes_utf8() {
        let bytes = "a\u{00E9}\u{65E5}\u{1F600}".as_bytes();
        let mut source = ReaderSource::new(bytes);
        assert_eq!(source.next_char().unwrap(), Some('a'));
        assert_eq!(source.next_char().unwrap(), Some('\u{00E9}'));
        assert_eq!(source.next_char().unwrap(), Some('\u{65E5}'));
        assert_eq!(source.next_char().unwrap(), Some('\u{1F600}'));
        assert_eq!(source.next_char().unwrap(), None);
    }

    #[test]
    fn test_reader_source_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xFF, 0x00];
        let mut source = ReaderSource::new(bytes);
        assert!(source.next_char().is_err());
    }

    #[test]
    fn test_reader_source_truncated_sequence() {
        let bytes: &[u8] = &[0xE6];
        let mut source = ReaderSource::new(bytes);
        assert!(source.next_char().is_err());
    }
}
