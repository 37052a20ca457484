//! Canonical serialization of KDL documents.
//!
//! The printer walks a document tree and emits a textually canonical form:
//! properties sorted by key, strings written at the minimal quoting level
//! the configuration permits, numbers rendered in their original radix.

mod config;

pub use config::{PrintConfig, PrintConfigBuilder, PrintConfigError};

use std::fmt::{self, Write};

use crate::chars::is_valid_bare_id;
use crate::document::KdlDocument;
use crate::node::KdlNode;
use crate::value::{KdlNumber, KdlValue, Radix};

pub(crate) fn write_document<W: Write>(
    writer: &mut W,
    document: &KdlDocument,
    config: &PrintConfig,
) -> fmt::Result {
    write_document_at_depth(writer, document, config, 0)
}

fn write_document_at_depth<W: Write>(
    writer: &mut W,
    document: &KdlDocument,
    config: &PrintConfig,
    depth: usize,
) -> fmt::Result {
    for node in document.nodes() {
        write_indent(writer, config, depth)?;
        write_node(writer, node, config, depth)?;
        writer.write_str(&config.newline)?;
    }
    Ok(())
}

fn write_indent<W: Write>(writer: &mut W, config: &PrintConfig, depth: usize) -> fmt::Result {
    for _ in 0..depth * config.indent {
        writer.write_char(config.indent_char)?;
    }
    Ok(())
}

pub(crate) fn write_node<W: Write>(
    writer: &mut W,
    node: &KdlNode,
    config: &PrintConfig,
    depth: usize,
) -> fmt::Result {
    if let Some(ty) = node.type_annotation() {
        writer.write_char('(')?;
        write_string(writer, ty, true, config)?;
        writer.write_char(')')?;
    }
    write_string(writer, node.identifier(), true, config)?;

    for arg in node.args() {
        if arg.is_null() && !config.print_null_args {
            continue;
        }
        writer.write_char(' ')?;
        write_value(writer, arg, config)?;
    }

    let mut props: Vec<(&String, &KdlValue)> = node.props().iter().collect();
    props.sort_by_key(|(key, _)| *key);
    for (key, value) in props {
        if value.is_null() && !config.print_null_props {
            continue;
        }
        writer.write_char(' ')?;
        write_string(writer, key, true, config)?;
        writer.write_char('=')?;
        write_value(writer, value, config)?;
    }

    if let Some(child) = node.child() {
        if !child.is_empty() || config.print_empty_children {
            writer.write_str(" {")?;
            writer.write_str(&config.newline)?;
            write_document_at_depth(writer, child, config, depth + 1)?;
            write_indent(writer, config, depth)?;
            writer.write_char('}')?;
        }
    }

    if config.require_semicolons {
        writer.write_char(';')?;
    }
    Ok(())
}

pub(crate) fn write_value<W: Write>(
    writer: &mut W,
    value: &KdlValue,
    config: &PrintConfig,
) -> fmt::Result {
    if let Some(ty) = value.type_annotation() {
        writer.write_char('(')?;
        write_string(writer, ty, true, config)?;
        writer.write_char(')')?;
    }
    match value {
        KdlValue::String { value, .. } => write_string(writer, value, false, config),
        KdlValue::Number { value, .. } => write_number(writer, value, config),
        KdlValue::Bool { value, .. } => writer.write_str(if *value { "true" } else { "false" }),
        KdlValue::Null { .. } => writer.write_str("null"),
    }
}

pub(crate) fn write_number<W: Write>(
    writer: &mut W,
    number: &KdlNumber,
    config: &PrintConfig,
) -> fmt::Result {
    match number.radix() {
        Radix::Decimal => write_decimal_text(writer, number.literal(), config),
        radix if config.respect_radix => {
            // the sign precedes the radix prefix
            match number.literal().strip_prefix('-') {
                Some(digits) => {
                    writer.write_char('-')?;
                    writer.write_str(radix.prefix())?;
                    writer.write_str(digits)
                }
                None => {
                    writer.write_str(radix.prefix())?;
                    writer.write_str(number.literal())
                }
            }
        }
        _ => write!(writer, "{}", number.value()),
    }
}

fn write_decimal_text<W: Write>(writer: &mut W, text: &str, config: &PrintConfig) -> fmt::Result {
    for c in text.chars() {
        match c {
            'e' | 'E' => writer.write_char(config.exponent_char)?,
            c => writer.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a string at the minimal quoting level: verbatim when it is a valid
/// bare identifier and bare output is allowed here, quoted otherwise.
pub(crate) fn write_string<W: Write>(
    writer: &mut W,
    s: &str,
    bare_allowed: bool,
    config: &PrintConfig,
) -> fmt::Result {
    if s.is_empty() {
        return writer.write_str("\"\"");
    }
    if bare_allowed && is_valid_bare_id(s) {
        return writer.write_str(s);
    }
    writer.write_char('"')?;
    for c in s.chars() {
        if config.requires_escape(c) {
            write_escaped(writer, c)?;
        } else {
            writer.write_char(c)?;
        }
    }
    writer.write_char('"')
}

/// Writes one escaped character: a short form when one exists, a `\u` escape
/// otherwise. Form feed has no short form here and renders as `\u000c`.
fn write_escaped<W: Write>(writer: &mut W, c: char) -> fmt::Result {
    match c {
        '\\' => writer.write_str("\\\\"),
        '"' => writer.write_str("\\\""),
        '\u{0008}' => writer.write_str("\\b"),
        '\n' => writer.write_str("\\n"),
        '\t' => writer.write_str("\\t"),
        '\r' => writer.write_str("\\r"),
        '/' => writer.write_str("\\/"),
        c if (c as u32) <= 0xFFFF => write!(writer, "\\u{:04x}", c as u32),
        c => write!(writer, "\\u{{{:x}}}", c as u32),
    }
}
