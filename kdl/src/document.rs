//! The KDL document model.

use std::fmt;
use std::str::FromStr;

use crate::error::KdlError;
use crate::node::KdlNode;
use crate::parser::KdlParser;
use crate::print::{self, PrintConfig};

/// An ordered sequence of top-level nodes. An empty document is legal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KdlDocument {
    nodes: Vec<KdlNode>,
}

impl KdlDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The nodes of the document, in order.
    pub fn nodes(&self) -> &[KdlNode] {
        &self.nodes
    }

    /// Appends a node.
    pub fn push(&mut self, node: KdlNode) {
        self.nodes.push(node);
    }

    /// Whether the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Serializes the document with the pretty default configuration.
    pub fn to_kdl(&self) -> String {
        self.to_kdl_with(&PrintConfig::pretty_default())
    }

    /// Serializes the document with the given configuration.
    pub fn to_kdl_with(&self, config: &PrintConfig) -> String {
        let mut out = String::new();
        self.write_kdl(&mut out, config)
            .expect("writing to a String cannot fail");
        out
    }

    /// Writes the document to a sink with the given configuration.
    pub fn write_kdl<W: fmt::Write>(&self, writer: &mut W, config: &PrintConfig) -> fmt::Result {
        print::write_document(writer, self, config)
    }
}

impl From<Vec<KdlNode>> for KdlDocument {
    fn from(nodes: Vec<KdlNode>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<KdlNode> for KdlDocument {
    fn from_iter<I: IntoIterator<Item = KdlNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a KdlDocument {
    type Item = &'a KdlNode;
    type IntoIter = std::slice::Iter<'a, KdlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl FromStr for KdlDocument {
    type Err = KdlError;

    fn from_str(s: &str) -> Result<Self, KdlError> {
        KdlParser::new().parse_str(s)
    }
}

impl fmt::Display for KdlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_kdl(f, &PrintConfig::pretty_default())
    }
}
