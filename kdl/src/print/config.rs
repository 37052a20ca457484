//! Print configuration.
//!
//! A [`PrintConfig`] bundles the style knobs for serializing a document:
//! escape policy, radix preservation, semicolons, indentation, and the
//! handling of nulls and empty child blocks. Configurations are built
//! through [`PrintConfigBuilder`], which validates the handful of options
//! that can be set to nonsense.

use std::collections::HashSet;

use thiserror::Error;

use crate::chars::{
    is_common_escape, is_printable_ascii, is_unicode_linespace, is_unicode_whitespace,
};

/// Error building a [`PrintConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrintConfigError {
    /// The newline string contained a non-line-space character.
    #[error("newline must be a non-empty sequence of line-space characters")]
    InvalidNewline,

    /// The indent character is not whitespace.
    #[error("indent character must be unicode whitespace")]
    InvalidIndentChar,

    /// The exponent character is not `e` or `E`.
    #[error("exponent character must be 'e' or 'E'")]
    InvalidExponentChar,
}

/// Style configuration for KDL serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    pub(crate) escapes: HashSet<char>,
    pub(crate) escape_non_printable_ascii: bool,
    pub(crate) escape_linespace: bool,
    pub(crate) escape_non_ascii: bool,
    pub(crate) escape_common: bool,
    pub(crate) require_semicolons: bool,
    pub(crate) respect_radix: bool,
    pub(crate) newline: String,
    pub(crate) indent: usize,
    pub(crate) indent_char: char,
    pub(crate) exponent_char: char,
    pub(crate) print_empty_children: bool,
    pub(crate) print_null_args: bool,
    pub(crate) print_null_props: bool,
}

impl PrintConfig {
    /// The standard human-readable style: four-space indentation, `\n`
    /// newlines, preserved radixes, escaped control characters.
    pub fn pretty_default() -> Self {
        Self {
            escapes: HashSet::new(),
            escape_non_printable_ascii: true,
            escape_linespace: true,
            escape_non_ascii: false,
            escape_common: true,
            require_semicolons: false,
            respect_radix: true,
            newline: "\n".to_string(),
            indent: 4,
            indent_char: ' ',
            exponent_char: 'E',
            print_empty_children: true,
            print_null_args: true,
            print_null_props: true,
        }
    }

    /// A minimal style: no indentation and no `{ }` for empty children.
    pub fn raw_default() -> Self {
        Self {
            indent: 0,
            print_empty_children: false,
            ..Self::pretty_default()
        }
    }

    /// Starts building a configuration from the pretty defaults.
    pub fn builder() -> PrintConfigBuilder {
        PrintConfigBuilder::new()
    }

    /// Whether `c` must be written escaped inside a quoted string.
    pub fn requires_escape(&self, c: char) -> bool {
        self.escapes.contains(&c)
            || c == '\\'
            || c == '"'
            || (self.escape_linespace && is_unicode_linespace(c))
            || (self.escape_non_printable_ascii
                && c.is_ascii()
                && !is_printable_ascii(c)
                && !is_unicode_whitespace(c)
                && !is_unicode_linespace(c))
            || (self.escape_non_ascii && (c as u32) > 127)
            || (self.escape_common && is_common_escape(c))
    }
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self::pretty_default()
    }
}

/// Builder for [`PrintConfig`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct PrintConfigBuilder {
    config: PrintConfig,
}

impl PrintConfigBuilder {
    /// Starts from the pretty defaults.
    pub fn new() -> Self {
        Self {
            config: PrintConfig::pretty_default(),
        }
    }

    /// Adds a character to the forced-escape set.
    pub fn escape(mut self, c: char) -> Self {
        self.config.escapes.insert(c);
        self
    }

    /// Adds characters to the forced-escape set.
    pub fn escapes(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.config.escapes.extend(chars);
        self
    }

    /// Escape ASCII controls other than whitespace and line-space.
    pub fn escape_non_printable_ascii(mut self, yes: bool) -> Self {
        self.config.escape_non_printable_ascii = yes;
        self
    }

    /// Escape line-space characters inside strings.
    pub fn escape_linespace(mut self, yes: bool) -> Self {
        self.config.escape_linespace = yes;
        self
    }

    /// Escape all code points above U+007F.
    pub fn escape_non_ascii(mut self, yes: bool) -> Self {
        self.config.escape_non_ascii = yes;
        self
    }

    /// Escape the common-escape set using its short forms.
    pub fn escape_common(mut self, yes: bool) -> Self {
        self.config.escape_common = yes;
        self
    }

    /// Append `;` after every node.
    pub fn require_semicolons(mut self, yes: bool) -> Self {
        self.config.require_semicolons = yes;
        self
    }

    /// Preserve `0x`/`0o`/`0b` prefixes on output.
    pub fn respect_radix(mut self, yes: bool) -> Self {
        self.config.respect_radix = yes;
        self
    }

    /// Sets the newline string. Must be all line-space.
    pub fn newline(mut self, newline: impl Into<String>) -> Self {
        self.config.newline = newline.into();
        self
    }

    /// Sets the indent width in characters.
    pub fn indent(mut self, width: usize) -> Self {
        self.config.indent = width;
        self
    }

    /// Sets the indent character. Must be whitespace.
    pub fn indent_char(mut self, c: char) -> Self {
        self.config.indent_char = c;
        self
    }

    /// Sets the exponent marker, `e` or `E`.
    pub fn exponent_char(mut self, c: char) -> Self {
        self.config.exponent_char = c;
        self
    }

    /// Emit `{ }` for empty child documents.
    pub fn print_empty_children(mut self, yes: bool) -> Self {
        self.config.print_empty_children = yes;
        self
    }

    /// Emit null-valued arguments.
    pub fn print_null_args(mut self, yes: bool) -> Self {
        self.config.print_null_args = yes;
        self
    }

    /// Emit null-valued properties.
    pub fn print_null_props(mut self, yes: bool) -> Self {
        self.config.print_null_props = yes;
        self
    }

    /// Validates and returns the finished configuration.
    pub fn build(self) -> Result<PrintConfig, PrintConfigError> {
        if self.config.newline.is_empty()
            || !self.config.newline.chars().all(is_unicode_linespace)
        {
            return Err(PrintConfigError::InvalidNewline);
        }
        if !is_unicode_whitespace(self.config.indent_char) {
            return Err(PrintConfigError::InvalidIndentChar);
        }
        if self.config.exponent_char != 'e' && self.config.exponent_char != 'E' {
            return Err(PrintConfigError::InvalidExponentChar);
        }
        Ok(self.config)
    }
}
