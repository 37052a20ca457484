//! The KDL node model and its builder.

use std::fmt;

use indexmap::IndexMap;

use crate::document::KdlDocument;
use crate::print::{self, PrintConfig};
use crate::value::KdlValue;

/// A single KDL node: an identifier, an optional type annotation, ordered
/// arguments, keyed properties, and an optional child document.
///
/// Properties keep insertion order in memory; assigning a key twice keeps
/// the last value. The printer emits them sorted by key regardless.
#[derive(Debug, Clone)]
pub struct KdlNode {
    identifier: String,
    ty: Option<String>,
    args: Vec<KdlValue>,
    props: IndexMap<String, KdlValue>,
    child: Option<KdlDocument>,
}

impl KdlNode {
    /// Creates a node with no type, arguments, properties, or child.
    pub fn new(identifier: impl Into<String>) -> Self {
        KdlNodeBuilder::new(identifier).build()
    }

    /// Starts building a node with the given identifier.
    pub fn builder(identifier: impl Into<String>) -> KdlNodeBuilder {
        KdlNodeBuilder::new(identifier)
    }

    /// The node identifier. Never empty.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The type annotation, if any.
    pub fn type_annotation(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    /// The ordered arguments.
    pub fn args(&self) -> &[KdlValue] {
        &self.args
    }

    /// The properties, in insertion order.
    pub fn props(&self) -> &IndexMap<String, KdlValue> {
        &self.props
    }

    /// Looks up a property by key.
    pub fn prop(&self, key: &str) -> Option<&KdlValue> {
        self.props.get(key)
    }

    /// The child document, if any.
    pub fn child(&self) -> Option<&KdlDocument> {
        self.child.as_ref()
    }
}

impl PartialEq for KdlNode {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.ty == other.ty
            && self.args == other.args
            && self.props.len() == other.props.len()
            && self
                .props
                .iter()
                .all(|(key, value)| other.props.get(key) == Some(value))
            && self.child == other.child
    }
}

impl fmt::Display for KdlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_node(f, self, &PrintConfig::pretty_default(), 0)
    }
}

/// Builder accumulating node content in source order.
#[derive(Debug, Clone)]
pub struct KdlNodeBuilder {
    identifier: String,
    ty: Option<String>,
    args: Vec<KdlValue>,
    props: IndexMap<String, KdlValue>,
    child: Option<KdlDocument>,
}

impl KdlNodeBuilder {
    /// Starts a builder for a node with the given identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is empty.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        assert!(!identifier.is_empty(), "node identifier must not be empty");
        Self {
            identifier,
            ty: None,
            args: Vec::new(),
            props: IndexMap::new(),
            child: None,
        }
    }

    /// Sets the type annotation.
    pub fn ty(&mut self, ty: impl Into<String>) -> &mut Self {
        self.ty = Some(ty.into());
        self
    }

    /// Appends an argument.
    pub fn arg(&mut self, value: impl Into<KdlValue>) -> &mut Self {
        self.args.push(value.into());
        self
    }

    /// Sets a property. Re-assigning a key keeps the latest value.
    pub fn prop(&mut self, key: impl Into<String>, value: impl Into<KdlValue>) -> &mut Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Attaches a child document.
    pub fn child(&mut self, child: KdlDocument) -> &mut Self {
        self.child = Some(child);
        self
    }

    /// Finishes the node.
    pub fn build(self) -> KdlNode {
        KdlNode {
            identifier: self.identifier,
            ty: self.ty,
            args: self.args,
            props: self.props,
            child: self.child,
        }
    }
}
