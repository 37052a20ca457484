//! Whitespace, comment, and slashdash absorption.
//!
//! Two separate state machines: one that may cross line breaks (used between
//! nodes) and one that may not (used inside a node body). The distinction is
//! load-bearing: a line break is a node terminator unless escaped with `\`.

use crate::chars::{is_unicode_linespace, is_unicode_whitespace};
use crate::error::{KdlError, Result};
use crate::reader::{CharSource, ParseContext};

use super::{KdlParser, WhitespaceResult};

impl KdlParser {
    /// Line-crossing absorber used between nodes and inside child braces.
    ///
    /// Absorbs horizontal whitespace, line-space, the BOM, line comments,
    /// nested block comments, line escapes, and `/-` markers.
    pub(crate) fn consume_whitespace_and_linespace<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<WhitespaceResult> {
        let mut skip_next = false;
        let mut found_whitespace = false;
        let mut found_linespace = false;

        loop {
            let c = match context.peek()? {
                Some(c) => c,
                None => break,
            };
            match c {
                '\u{FEFF}' => {
                    context.read()?;
                    found_whitespace = true;
                }
                c if is_unicode_linespace(c) => {
                    context.read()?;
                    found_linespace = true;
                }
                c if is_unicode_whitespace(c) => {
                    context.read()?;
                    found_whitespace = true;
                }
                '\\' => {
                    self.consume_line_escape(context)?;
                    found_whitespace = true;
                }
                '/' => {
                    context.read()?;
                    match context.peek()? {
                        Some('/') => {
                            self.consume_line_comment(context)?;
                            found_linespace = true;
                        }
                        Some('*') => {
                            self.consume_block_comment(context)?;
                            found_whitespace = true;
                        }
                        Some('-') => {
                            context.read()?;
                            self.check_skip_marker_target(context)?;
                            skip_next = true;
                        }
                        _ => {
                            context.unread('/')?;
                            break;
                        }
                    }
                }
                _ => break,
            }
        }

        Ok(if skip_next {
            WhitespaceResult::SkipNext
        } else if found_linespace {
            WhitespaceResult::EndNode
        } else if found_whitespace {
            WhitespaceResult::NodeSpace
        } else {
            WhitespaceResult::NoWhitespace
        })
    }

    /// Non-line-crossing absorber used within a node body.
    ///
    /// Absorbs horizontal whitespace, nested block comments, line escapes,
    /// and `/-` markers. An unescaped line break, a `;`, a bare line
    /// comment, or EOF ends the node.
    pub(crate) fn consume_whitespace_and_block_comments<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<WhitespaceResult> {
        let mut skip_next = false;
        let mut found_whitespace = false;

        loop {
            let c = match context.peek()? {
                Some(c) => c,
                None => break,
            };
            match c {
                ';' => break,
                c if is_unicode_linespace(c) => break,
                c if is_unicode_whitespace(c) => {
                    context.read()?;
                    found_whitespace = true;
                }
                '\\' => {
                    self.consume_line_escape(context)?;
                    found_whitespace = true;
                }
                '/' => {
                    context.read()?;
                    match context.peek()? {
                        Some('*') => {
                            self.consume_block_comment(context)?;
                            found_whitespace = true;
                        }
                        Some('/') => {
                            // bare line comment: the node ends here and the
                            // document loop consumes the comment
                            context.unread('/')?;
                            return Ok(if skip_next {
                                WhitespaceResult::SkipNext
                            } else {
                                WhitespaceResult::EndNode
                            });
                        }
                        Some('-') => {
                            context.read()?;
                            self.check_skip_marker_target(context)?;
                            skip_next = true;
                        }
                        _ => {
                            context.unread('/')?;
                            break;
                        }
                    }
                }
                _ => break,
            }
        }

        Ok(if skip_next {
            WhitespaceResult::SkipNext
        } else {
            match context.peek()? {
                None | Some(';') => WhitespaceResult::EndNode,
                Some(c) if is_unicode_linespace(c) => WhitespaceResult::EndNode,
                _ if found_whitespace => WhitespaceResult::NodeSpace,
                _ => WhitespaceResult::NoWhitespace,
            }
        })
    }

    /// A `/-` marker directly followed by a line break or EOF has nothing
    /// it could skip.
    fn check_skip_marker_target<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<()> {
        match context.peek()? {
            None => Err(KdlError::parse("Unexpected skip marker before EOF")),
            Some(c) if is_unicode_linespace(c) => {
                Err(KdlError::parse("Unexpected skip marker before newline"))
            }
            Some(_) => Ok(()),
        }
    }

    /// Consumes a `\` line escape: the backslash, optional horizontal
    /// whitespace, an optional line comment, and one line break.
    fn consume_line_escape<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<()> {
        if context.read()? != Some('\\') {
            return Err(KdlError::internal("expected '\\' at start of line escape"));
        }
        loop {
            match context.peek()? {
                None => return Ok(()),
                Some(c) if is_unicode_whitespace(c) => {
                    context.read()?;
                }
                Some('/') => {
                    context.read()?;
                    if context.peek()? == Some('/') {
                        return self.consume_line_comment(context);
                    }
                    return Err(KdlError::parse("Illegal character after line escape: '/'"));
                }
                Some('\r') => {
                    context.read()?;
                    if context.peek()? == Some('\n') {
                        context.read()?;
                    }
                    return Ok(());
                }
                Some(c) if is_unicode_linespace(c) => {
                    context.read()?;
                    return Ok(());
                }
                Some(c) => {
                    return Err(KdlError::parse(format!(
                        "Illegal character after line escape: '{}'",
                        c
                    )));
                }
            }
        }
    }

    /// Consumes a `//` comment through the end of the line, including the
    /// terminating line break. Expects the first `/` to have been consumed.
    fn consume_line_comment<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<()> {
        if context.read()? != Some('/') {
            return Err(KdlError::internal("expected '/' at start of line comment"));
        }
        loop {
            match context.read()? {
                None => return Ok(()),
                Some('\r') => {
                    if context.peek()? == Some('\n') {
                        context.read()?;
                    }
                    return Ok(());
                }
                Some(c) if is_unicode_linespace(c) => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Consumes a `/* ... */` comment, tracking nesting with a depth
    /// counter. Expects the leading `/` to have been consumed.
    fn consume_block_comment<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<()> {
        if context.read()? != Some('*') {
            return Err(KdlError::internal("expected '*' at start of block comment"));
        }
        let mut depth = 1u32;
        while depth > 0 {
            match context.read()? {
                None => return Err(KdlError::parse("Got EOF while parsing block comment")),
                Some('/') => {
                    if context.peek()? == Some('*') {
                        context.read()?;
                        depth += 1;
                    }
                }
                Some('*') => {
                    if context.peek()? == Some('/') {
                        context.read()?;
                        depth -= 1;
                    }
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::StrSource;

    fn absorb_crossing(input: &str) -> (WhitespaceResult, Option<char>) {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new(input));
        let result = parser.consume_whitespace_and_linespace(&mut ctx).unwrap();
        (result, ctx.peek().unwrap())
    }

    fn absorb_in_node(input: &str) -> (WhitespaceResult, Option<char>) {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new(input));
        let result = parser
            .consume_whitespace_and_block_comments(&mut ctx)
            .unwrap();
        (result, ctx.peek().unwrap())
    }

    #[test]
    fn test_crossing_no_whitespace() {
        assert_eq!(absorb_crossing("node"), (WhitespaceResult::NoWhitespace, Some('n')));
    }

    #[test]
    fn test_crossing_node_space() {
        assert_eq!(absorb_crossing("  \t node"), (WhitespaceResult::NodeSpace, Some('n')));
    }

    #[test]
    fn test_crossing_end_node() {
        assert_eq!(absorb_crossing("\n node"), (WhitespaceResult::EndNode, Some('n')));
    }

    #[test]
    fn test_crossing_absorbs_comments() {
        let (result, next) = absorb_crossing("// one\n/* two */ node");
        assert_eq!(result, WhitespaceResult::EndNode);
        assert_eq!(next, Some('n'));
    }

    #[test]
    fn test_crossing_skip_marker() {
        assert_eq!(absorb_crossing("/- node"), (WhitespaceResult::SkipNext, Some('n')));
    }

    #[test]
    fn test_crossing_stops_before_bare_slash() {
        let (result, next) = absorb_crossing(" /x");
        assert_eq!(result, WhitespaceResult::NodeSpace);
        assert_eq!(next, Some('/'));
    }

    #[test]
    fn test_in_node_stops_at_linespace() {
        assert_eq!(absorb_in_node("  \nmore"), (WhitespaceResult::EndNode, Some('\n')));
    }

    #[test]
    fn test_in_node_stops_at_semicolon() {
        assert_eq!(absorb_in_node(" ;"), (WhitespaceResult::EndNode, Some(';')));
    }

    #[test]
    fn test_in_node_line_comment_ends_node() {
        let (result, next) = absorb_in_node(" // rest\nx");
        assert_eq!(result, WhitespaceResult::EndNode);
        assert_eq!(next, Some('/'));
    }

    #[test]
    fn test_in_node_block_comment_continues() {
        assert_eq!(absorb_in_node("/* c */x"), (WhitespaceResult::NodeSpace, Some('x')));
    }

    #[test]
    fn test_in_node_line_escape_crosses_newline() {
        assert_eq!(absorb_in_node("\\\n  x"), (WhitespaceResult::NodeSpace, Some('x')));
    }

    #[test]
    fn test_in_node_eof_ends_node() {
        assert_eq!(absorb_in_node("   "), (WhitespaceResult::EndNode, None));
    }

    #[test]
    fn test_line_escape_rejects_garbage() {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new("\\ x"));
        let err = parser
            .consume_whitespace_and_block_comments(&mut ctx)
            .unwrap_err();
        assert!(err.to_string().contains("line escape"));
    }

    #[test]
    fn test_skip_marker_before_linespace_is_fatal() {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new("/-\n"));
        let err = parser
            .consume_whitespace_and_linespace(&mut ctx)
            .unwrap_err();
        assert!(err.to_string().contains("skip marker"));
    }

    #[test]
    fn test_deeply_nested_block_comment() {
        let (result, next) = absorb_crossing("/* 1 /* 2 /* 3 */ 2 */ 1 */x");
        assert_eq!(result, WhitespaceResult::NodeSpace);
        assert_eq!(next, Some('x'));
    }
}
