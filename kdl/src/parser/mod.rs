//! Recursive-descent parser for KDL documents.
//!
//! The parser consumes characters directly from a [`ParseContext`]; there is
//! no separate token stream. Each grammar production has a corresponding
//! method, organized into smaller, focused components:
//!
//! - this module: the document, node, argument/property, and value loops
//! - `whitespace`: the two whitespace/comment state machines
//! - `number`: decimal and radix-prefixed number literals
//! - `string`: escaped and raw string literals
//! - `ident`: identifiers and type annotations
//!
//! The parser itself is stateless; all position state lives in the context,
//! so a single parser may be shared across threads with one context per run.

mod ident;
mod number;
mod string;
mod whitespace;

pub(crate) use number::parse_number_str;

use std::io::Read;

use crate::chars::{is_unicode_linespace, is_valid_bare_id_start, is_valid_numeric_start};
use crate::document::KdlDocument;
use crate::error::{KdlError, Result};
use crate::node::{KdlNode, KdlNodeBuilder};
use crate::reader::{CharSource, ParseContext, ReaderSource, StrSource};
use crate::value::KdlValue;

/// Outcome of one whitespace absorption pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WhitespaceResult {
    /// Nothing was consumed.
    NoWhitespace,
    /// Horizontal whitespace only: a separator within a node.
    NodeSpace,
    /// A node terminator comes next: line break, `;`, comment, or EOF.
    EndNode,
    /// A `/-` marker: the next node, argument, property, or child is
    /// parsed normally and then discarded.
    SkipNext,
}

/// One argument or one `key=value` property.
enum ArgOrProp {
    Arg(KdlValue),
    Prop(String, KdlValue),
}

/// Parser for the KDL document language.
///
/// # Example
///
/// ```
/// use kdl::KdlParser;
///
/// let parser = KdlParser::new();
/// let document = parser.parse_str("node a=1").unwrap();
/// assert_eq!(document.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KdlParser;

impl KdlParser {
    /// Creates a parser.
    pub fn new() -> Self {
        KdlParser
    }

    /// Parses one complete document from a string.
    pub fn parse_str(&self, input: &str) -> Result<KdlDocument> {
        self.parse_source(StrSource::new(input))
    }

    /// Parses one complete document from a UTF-8 reader.
    pub fn parse<R: Read>(&self, reader: R) -> Result<KdlDocument> {
        self.parse_source(ReaderSource::new(reader))
    }

    /// Parses one complete document from an arbitrary character source.
    pub fn parse_source<S: CharSource>(&self, source: S) -> Result<KdlDocument> {
        let mut context = ParseContext::new(source);
        match self.parse_document(&mut context, true) {
            Ok(document) => Ok(document),
            Err(err) => match context.error_location() {
                Ok(location) => Err(err.with_location(&location)),
                Err(_) => Err(err),
            },
        }
    }

    fn parse_document<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
        root: bool,
    ) -> Result<KdlDocument> {
        let mut nodes = Vec::new();
        loop {
            let skipping_node = matches!(
                self.consume_whitespace_and_linespace(context)?,
                WhitespaceResult::SkipNext
            );

            match context.peek()? {
                None => {
                    return if root {
                        Ok(nodes.into())
                    } else {
                        Err(KdlError::parse("Got EOF, expected a node or '}'"))
                    };
                }
                Some('}') => {
                    return if root {
                        Err(KdlError::parse("Unexpected '}' in root document"))
                    } else {
                        Ok(nodes.into())
                    };
                }
                Some(_) => {}
            }

            let node = self.parse_node(context)?;
            if !skipping_node {
                if let Some(node) = node {
                    nodes.push(node);
                }
            }
        }
    }

    fn parse_node<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<Option<KdlNode>> {
        if context.peek()? == Some('}') {
            return Ok(None);
        }

        let ty = self.parse_type_annotation_if_present(context)?;
        let identifier = self.parse_identifier(context)?;
        if identifier.is_empty() {
            return Err(KdlError::parse("Node identifiers must not be empty"));
        }
        let mut builder = KdlNodeBuilder::new(identifier);
        if let Some(ty) = ty {
            builder.ty(ty);
        }

        loop {
            let whitespace = self.consume_whitespace_and_block_comments(context)?;
            match whitespace {
                WhitespaceResult::EndNode => {
                    if context.peek()? == Some(';') {
                        context.read()?;
                    }
                    return Ok(Some(builder.build()));
                }
                WhitespaceResult::SkipNext => match context.peek()? {
                    None => return Err(KdlError::parse("Unexpected skip marker before EOF")),
                    Some(c) if is_unicode_linespace(c) => {
                        return Err(KdlError::parse("Unexpected skip marker before newline"));
                    }
                    Some('{') => {
                        self.parse_child(context)?;
                    }
                    Some(_) => {
                        self.parse_arg_or_prop(context)?;
                    }
                },
                WhitespaceResult::NodeSpace | WhitespaceResult::NoWhitespace => {
                    match context.peek()? {
                        Some('{') => {
                            let child = self.parse_child(context)?;
                            builder.child(child);
                            return Ok(Some(builder.build()));
                        }
                        Some('}') | None => return Ok(Some(builder.build())),
                        Some(_) if whitespace == WhitespaceResult::NodeSpace => {
                            match self.parse_arg_or_prop(context)? {
                                ArgOrProp::Arg(value) => {
                                    builder.arg(value);
                                }
                                ArgOrProp::Prop(key, value) => {
                                    builder.prop(key, value);
                                }
                            }
                        }
                        Some(c) => {
                            return Err(KdlError::parse(format!(
                                "Unexpected character after node identifier: '{}'",
                                c
                            )));
                        }
                    }
                }
            }
        }
    }

    fn parse_child<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<KdlDocument> {
        if context.read()? != Some('{') {
            return Err(KdlError::internal("expected '{' at start of child block"));
        }
        let document = self.parse_document(context, false)?;
        match context.read()? {
            Some('}') => Ok(document),
            _ => Err(KdlError::internal("expected '}' after child document")),
        }
    }

    fn parse_arg_or_prop<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<ArgOrProp> {
        let ty = self.parse_type_annotation_if_present(context)?;
        let c = match context.peek()? {
            Some(c) => c,
            None => return Err(KdlError::parse("Got EOF, expected an argument or property")),
        };

        // Numbers can never be property keys, so they short-circuit.
        if c.is_ascii_digit() {
            let number = self.parse_number(context)?;
            return Ok(ArgOrProp::Arg(KdlValue::Number { value: number, ty }));
        }
        if c == '+' || c == '-' {
            context.read()?;
            let next = context.peek()?;
            context.unread(c)?;
            if matches!(next, Some(d) if d.is_ascii_digit()) {
                let number = self.parse_number(context)?;
                return Ok(ArgOrProp::Arg(KdlValue::Number { value: number, ty }));
            }
        }

        let (string, bare) = if c == '"' {
            (self.parse_escaped_string(context)?, false)
        } else if c == 'r' {
            context.read()?;
            let next = context.peek()?;
            context.unread('r')?;
            if matches!(next, Some('"') | Some('#')) {
                (self.parse_raw_string(context)?, false)
            } else {
                (self.parse_bare_identifier(context)?, true)
            }
        } else if is_valid_bare_id_start(c) {
            (self.parse_bare_identifier(context)?, true)
        } else {
            return Err(KdlError::parse(format!("Unexpected character: '{}'", c)));
        };

        if context.peek()? == Some('=') {
            if ty.is_some() {
                return Err(KdlError::parse("Illegal type annotation before property key"));
            }
            context.read()?;
            let value = self.parse_value(context)?;
            return Ok(ArgOrProp::Prop(string, value));
        }

        if bare {
            return match string.as_str() {
                "true" => Ok(ArgOrProp::Arg(KdlValue::Bool { value: true, ty })),
                "false" => Ok(ArgOrProp::Arg(KdlValue::Bool { value: false, ty })),
                "null" => Ok(ArgOrProp::Arg(KdlValue::Null { ty })),
                _ => Err(KdlError::parse("Arguments may not be bare")),
            };
        }

        Ok(ArgOrProp::Arg(KdlValue::String { value: string, ty }))
    }

    /// Parses the right-hand side of a `key=` property.
    fn parse_value<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<KdlValue> {
        let ty = self.parse_type_annotation_if_present(context)?;
        let c = match context.peek()? {
            Some(c) => c,
            None => return Err(KdlError::parse("Got EOF, expected a value")),
        };
        match c {
            '"' => Ok(KdlValue::String {
                value: self.parse_escaped_string(context)?,
                ty,
            }),
            'r' => Ok(KdlValue::String {
                value: self.parse_raw_string(context)?,
                ty,
            }),
            c if is_valid_numeric_start(c) => Ok(KdlValue::Number {
                value: self.parse_number(context)?,
                ty,
            }),
            _ => {
                let mut literal = String::new();
                while let Some(c) = context.peek()? {
                    if !crate::chars::is_literal_char(c) {
                        break;
                    }
                    context.read()?;
                    literal.push(c);
                }
                match literal.as_str() {
                    "true" => Ok(KdlValue::Bool { value: true, ty }),
                    "false" => Ok(KdlValue::Bool { value: false, ty }),
                    "null" => Ok(KdlValue::Null { ty }),
                    _ => Err(KdlError::parse(format!("Unknown literal: '{}'", literal))),
                }
            }
        }
    }
}
