//! Escaped and raw string parsing.

use crate::chars::is_valid_hex_char;
use crate::error::{KdlError, Result};
use crate::reader::{CharSource, ParseContext};

use super::KdlParser;

impl KdlParser {
    /// Parses a `"`-delimited string, processing escape sequences.
    pub(crate) fn parse_escaped_string<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<String> {
        if context.read()? != Some('"') {
            return Err(KdlError::internal("expected '\"' at start of string"));
        }
        let mut value = String::new();
        loop {
            match context.read()? {
                None => return Err(KdlError::parse("Got EOF while parsing string")),
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.parse_escape(context)?),
                Some(c) => value.push(c),
            }
        }
    }

    /// Parses one escape sequence, after the introducing backslash.
    fn parse_escape<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<char> {
        match context.read()? {
            None => Err(KdlError::parse("Got EOF while parsing escape sequence")),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('"') => Ok('"'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('u') => self.parse_unicode_escape(context),
            Some(c) => Err(KdlError::parse(format!("Illegal escape sequence: '\\{}'", c))),
        }
    }

    /// Parses the code point of a `\u` escape: `{` followed by one to six
    /// hex digits and `}`, or the braceless four-digit form the printer
    /// emits for characters without a short escape.
    fn parse_unicode_escape<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<char> {
        let mut hex = String::new();
        if context.peek()? == Some('{') {
            context.read()?;
            loop {
                match context.read()? {
                    None => return Err(KdlError::parse("Got EOF while parsing unicode escape")),
                    Some('}') => break,
                    Some(c) if is_valid_hex_char(c) => {
                        if hex.len() == 6 {
                            return Err(KdlError::parse(
                                "Unicode escape sequences may have at most 6 digits",
                            ));
                        }
                        hex.push(c);
                    }
                    Some(c) => {
                        return Err(KdlError::parse(format!(
                            "Illegal character in unicode escape: '{}'",
                            c
                        )));
                    }
                }
            }
            if hex.is_empty() {
                return Err(KdlError::parse(
                    "Unicode escape sequences must have at least 1 digit",
                ));
            }
        } else {
            for _ in 0..4 {
                match context.read()? {
                    None => return Err(KdlError::parse("Got EOF while parsing unicode escape")),
                    Some(c) if is_valid_hex_char(c) => hex.push(c),
                    Some(c) => {
                        return Err(KdlError::parse(format!(
                            "Illegal character in unicode escape: '{}'",
                            c
                        )));
                    }
                }
            }
        }

        let code_point = u32::from_str_radix(&hex, 16).map_err(|_| {
            KdlError::internal(format!("failed to parse pre-vetted hex digits: '{}'", hex))
        })?;
        if code_point > 0x10FFFF {
            return Err(KdlError::parse(format!(
                "Unicode code point out of range: {:#x}",
                code_point
            )));
        }
        char::from_u32(code_point).ok_or_else(|| {
            KdlError::parse(format!("Invalid unicode code point: {:#x}", code_point))
        })
    }

    /// Parses a raw string: `r`, a `#` fence, `"`, then content until a `"`
    /// followed by a matching fence.
    pub(crate) fn parse_raw_string<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<String> {
        if context.read()? != Some('r') {
            return Err(KdlError::internal("expected 'r' at start of raw string"));
        }
        let mut fence = 0usize;
        while context.peek()? == Some('#') {
            context.read()?;
            fence += 1;
        }
        if context.read()? != Some('"') {
            return Err(KdlError::parse("Malformed raw string prefix"));
        }

        let mut value = String::new();
        loop {
            match context.read()? {
                None => return Err(KdlError::parse("Got EOF while parsing raw string")),
                Some('"') => {
                    let mut hashes = 0usize;
                    while context.peek()? == Some('#') {
                        context.read()?;
                        hashes += 1;
                    }
                    if hashes == fence {
                        return Ok(value);
                    }
                    if hashes > fence {
                        return Err(KdlError::parse(
                            "Too many # characters when closing raw string",
                        ));
                    }
                    value.push('"');
                    for _ in 0..hashes {
                        value.push('#');
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::StrSource;

    fn parse_string(input: &str) -> Result<String> {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new(input));
        parser.parse_escaped_string(&mut ctx)
    }

    fn parse_raw(input: &str) -> Result<String> {
        let parser = KdlParser::new();
        let mut ctx = ParseContext::new(StrSource::new(input));
        parser.parse_raw_string(&mut ctx)
    }

    #[test]
    fn test_simple_string() {
        assert_eq!(parse_string("\"hello\"").unwrap(), "hello");
        assert_eq!(parse_string("\"\"").unwrap(), "");
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(parse_string(r#""a\nb\tc\rd""#).unwrap(), "a\nb\tc\rd");
        assert_eq!(parse_string(r#""\"\\\/""#).unwrap(), "\"\\/");
        assert_eq!(parse_string(r#""\b\f""#).unwrap(), "\u{0008}\u{000C}");
    }

    #[test]
    fn test_unicode_escape_braced() {
        assert_eq!(parse_string(r#""\u{41}""#).unwrap(), "A");
        assert_eq!(parse_string(r#""\u{0}""#).unwrap(), "\u{0}");
        assert_eq!(parse_string(r#""\u{10FFFF}""#).unwrap(), "\u{10FFFF}");
    }

    #[test]
    fn test_unicode_escape_braceless_four_digits() {
        assert_eq!(parse_string("\"a\\u000cb\"").unwrap(), "a\u{000C}b");
        assert_eq!(parse_string("\"\\u00e9\"").unwrap(), "\u{00E9}");
        assert!(parse_string("\"\\u00g9\"").is_err());
        assert!(parse_string("\"\\u12\"").is_err());
    }

    #[test]
    fn test_unicode_escape_out_of_range() {
        assert!(parse_string(r#""\u{110000}""#).is_err());
        assert!(parse_string(r#""\u{1234567}""#).is_err());
    }

    #[test]
    fn test_unicode_escape_surrogate_is_rejected() {
        assert!(parse_string(r#""\u{D800}""#).is_err());
    }

    #[test]
    fn test_unicode_escape_empty_is_rejected() {
        assert!(parse_string(r#""\u{}""#).is_err());
    }

    #[test]
    fn test_illegal_escape_is_rejected() {
        let err = parse_string(r#""\q""#).unwrap_err();
        assert!(err.to_string().contains("Illegal escape sequence"));
    }

    #[test]
    fn test_eof_in_string_is_rejected() {
        assert!(parse_string("\"never closed").is_err());
        assert!(parse_string("\"trailing\\").is_err());
    }

    #[test]
    fn test_multiline_string_content() {
        assert_eq!(parse_string("\"a\nb\"").unwrap(), "a\nb");
    }

    #[test]
    fn test_raw_string_without_fence() {
        assert_eq!(parse_raw("r\"plain\"").unwrap(), "plain");
        assert_eq!(parse_raw("r\"a\\nb\"").unwrap(), "a\\nb");
    }

    #[test]
    fn test_raw_string_with_fence() {
        assert_eq!(parse_raw("r#\"he said \"hi\"\"#").unwrap(), "he said \"hi\"");
        assert_eq!(parse_raw("r##\"quote \"# inside\"##").unwrap(), "quote \"# inside");
    }

    #[test]
    fn test_raw_string_shorter_fence_is_content() {
        assert_eq!(parse_raw("r##\"a\"#b\"##").unwrap(), "a\"#b");
    }

    #[test]
    fn test_raw_string_overlong_fence_is_rejected() {
        let err = parse_raw("r#\"text\"##").unwrap_err();
        assert!(err.to_string().contains("Too many #"));
    }

    #[test]
    fn test_raw_string_eof_is_rejected() {
        assert!(parse_raw("r#\"never closed\"").is_err());
        assert!(parse_raw("r##").is_err());
    }
}
