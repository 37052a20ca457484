//! Identifier and type annotation parsing.

use crate::chars::{is_valid_bare_id_char, is_valid_bare_id_start};
use crate::error::{KdlError, Result};
use crate::reader::{CharSource, ParseContext};

use super::KdlParser;

impl KdlParser {
    /// Parses an identifier in any of its three forms: bare, quoted, or raw.
    pub(crate) fn parse_identifier<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<String> {
        let c = match context.peek()? {
            Some(c) => c,
            None => return Err(KdlError::parse("Got EOF, expected an identifier")),
        };
        if c == '"' {
            return self.parse_escaped_string(context);
        }
        if c == 'r' {
            context.read()?;
            let next = context.peek()?;
            context.unread('r')?;
            if matches!(next, Some('"') | Some('#')) {
                return self.parse_raw_string(context);
            }
        }
        self.parse_bare_identifier(context)
    }

    /// Parses a bare identifier: a bare-id start followed by any number of
    /// bare-id continuation characters.
    pub(crate) fn parse_bare_identifier<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<String> {
        let c = match context.read()? {
            Some(c) => c,
            None => return Err(KdlError::internal("EOF when a bare identifier was expected")),
        };
        if !is_valid_bare_id_start(c) {
            return Err(KdlError::parse(format!(
                "Illegal character at start of bare identifier: '{}'",
                c
            )));
        }
        let mut identifier = String::new();
        identifier.push(c);
        while let Some(c) = context.peek()? {
            if !is_valid_bare_id_char(c) {
                break;
            }
            context.read()?;
            identifier.push(c);
        }
        Ok(identifier)
    }

    /// Parses a `(type)` annotation if one is present.
    pub(crate) fn parse_type_annotation_if_present<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<Option<String>> {
        if context.peek()? != Some('(') {
            return Ok(None);
        }
        context.read()?;
        let identifier = self.parse_identifier(context)?;
        match context.read()? {
            Some(')') => Ok(Some(identifier)),
            Some(c) => Err(KdlError::parse(format!(
                "Unexpected character in type annotation: '{}'",
                c
            ))),
            None => Err(KdlError::parse("Got EOF, expected ')' to close type annotation")),
        }
    }
}
