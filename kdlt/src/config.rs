//! Configuration module for the kdlt CLI.
//!
//! Settings are loaded from a `kdlt.toml` file in the working directory, or
//! from a path given with `--config`. The `[format]` section maps onto the
//! library's print configuration.

use std::path::Path;

use serde::Deserialize;

use kdl::{PrintConfig, PrintConfigBuilder};

use crate::error::{KdltError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "kdlt.toml";

/// Application configuration structure.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Formatting options for `kdlt fmt`.
    #[serde(default)]
    pub format: FormatConfig,
}

/// Formatting options, mirroring the library print configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FormatConfig {
    /// Indent width in spaces.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Append `;` after every node.
    #[serde(default)]
    pub semicolons: bool,

    /// Exponent marker for decimal numbers, `e` or `E`.
    #[serde(default = "default_exponent_char")]
    pub exponent_char: char,

    /// Preserve hex/octal/binary prefixes on output.
    #[serde(default = "default_true")]
    pub respect_radix: bool,

    /// Escape all code points above U+007F.
    #[serde(default)]
    pub escape_non_ascii: bool,

    /// Emit `{ }` for empty child documents.
    #[serde(default = "default_true")]
    pub print_empty_children: bool,

    /// Emit null-valued arguments.
    #[serde(default = "default_true")]
    pub print_null_args: bool,

    /// Emit null-valued properties.
    #[serde(default = "default_true")]
    pub print_null_props: bool,
}

fn default_indent() -> usize {
    4
}

fn default_exponent_char() -> char {
    'E'
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            format: FormatConfig::default(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            semicolons: false,
            exponent_char: default_exponent_char(),
            respect_radix: true,
            escape_non_ascii: false,
            print_empty_children: true,
            print_null_args: true,
            print_null_props: true,
        }
    }
}

impl Config {
    /// Loads the configuration from `kdlt.toml` in the working directory,
    /// falling back to defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KdltError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

impl FormatConfig {
    /// Builds the library print configuration described by this section.
    pub fn to_print_config(&self) -> Result<PrintConfig> {
        let builder: PrintConfigBuilder = PrintConfig::builder()
            .indent(self.indent)
            .require_semicolons(self.semicolons)
            .exponent_char(self.exponent_char)
            .respect_radix(self.respect_radix)
            .escape_non_ascii(self.escape_non_ascii)
            .print_empty_children(self.print_empty_children)
            .print_null_args(self.print_null_args)
            .print_null_props(self.print_null_props);
        builder
            .build()
            .map_err(|e| KdltError::Config(e.to_string()))
    }
}
