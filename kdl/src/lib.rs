//! Parsing and printing for the KDL document language (version 1.x).
//!
//! A KDL document is an ordered sequence of nodes. Each node has an
//! identifier, optional `(type)` annotation, ordered arguments, keyed
//! properties, and an optional `{ ... }` child document. Values are strings,
//! numbers (in four radixes, arbitrary precision), booleans, or null.
//!
//! Parsing is recursive descent directly over characters; printing walks the
//! tree and emits a canonical form with properties sorted by key and strings
//! written at the minimal quoting level.
//!
//! # Example
//!
//! ```
//! let document = kdl::parse_str("node b=2 a=1 {\n  child 0x10\n}").unwrap();
//! assert_eq!(
//!     document.to_kdl(),
//!     "node a=1 b=2 {\n    child 0x10\n}\n"
//! );
//! ```

pub mod chars;
mod document;
mod edge_cases;
mod error;
mod node;
mod parser;
mod print;
mod reader;
mod value;

pub use document::KdlDocument;
pub use error::{KdlError, Result};
pub use node::{KdlNode, KdlNodeBuilder};
pub use parser::KdlParser;
pub use print::{PrintConfig, PrintConfigBuilder, PrintConfigError};
pub use reader::{CharSource, ParseContext, ReaderSource, StrSource};
pub use value::{KdlNumber, KdlValue, Radix};

/// Parses one KDL document from a string.
///
/// # Example
///
/// ```
/// let document = kdl::parse_str("a; b; c").unwrap();
/// assert_eq!(document.len(), 3);
/// ```
pub fn parse_str(input: &str) -> Result<KdlDocument> {
    KdlParser::new().parse_str(input)
}
