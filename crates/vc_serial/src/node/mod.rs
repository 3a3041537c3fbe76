//! The structured node, the only shape the engine emits or consumes.
//!
//! A [`Node`] is a named tree node carrying ordered named attributes
//! (textual values) and ordered named child nodes. How nodes reach a
//! document (markup, RON, JSON, ...) is up to the caller; with the `serde`
//! feature `Node` implements `serde::Serialize` and `serde::Deserialize`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Attribute holding the textual value of a primitive.
pub const VALUE_ATTRIBUTE: &str = "Value";

// -----------------------------------------------------------------------------
// Attribute

/// A named textual attribute of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// -----------------------------------------------------------------------------
// Node

/// A structured node: a name, ordered attributes and ordered children.
///
/// Attribute names are unique within a node, [`Node::set_attribute`]
/// replaces an existing value in place. Children may share names, lookups
/// return the first match.
///
/// # Examples
///
/// ```
/// use vc_serial::node::Node;
///
/// let node = Node::new("P")
///     .with_child(Node::primitive("x", "3"))
///     .with_child(Node::primitive("y", "4"));
///
/// assert_eq!(node.child("x").and_then(Node::value), Some("3"));
/// assert_eq!(node.children().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    children: Vec<Node>,
}

impl Node {
    /// Creates a node without attributes or children.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates the node of a primitive value, `<name Value="value"/>`.
    #[inline]
    pub fn primitive(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_attribute(VALUE_ATTRIBUTE, value)
    }

    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in insertion order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the children in insertion order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the [`VALUE_ATTRIBUTE`] of a primitive node.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.attribute(VALUE_ATTRIBUTE)
    }

    /// Returns the first child called `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Sets the attribute `name`, replacing the previous value if present.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Builder form of [`Node::set_attribute`].
    #[inline]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Appends a child node.
    #[inline]
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`Node::push_child`].
    #[inline]
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }

    /// Removes and returns the first child called `name`.
    pub fn take_child(&mut self, name: &str) -> Option<Node> {
        let index = self.children.iter().position(|child| child.name == name)?;
        Some(self.children.remove(index))
    }
}

impl fmt::Display for Node {
    /// Writes the node as indented markup, for diagnostics only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(node: &Node, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:indent$}<{}", "", node.name, indent = depth * 2)?;
            for attr in &node.attributes {
                write!(f, " {}={:?}", attr.name, attr.value)?;
            }
            if node.children.is_empty() {
                return f.write_str("/>");
            }
            f.write_str(">")?;
            for child in &node.children {
                f.write_str("\n")?;
                write_node(child, depth + 1, f)?;
            }
            write!(f, "\n{:indent$}</{}>", "", node.name, indent = depth * 2)
        }
        write_node(self, 0, f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Node;

    #[test]
    fn attributes_are_unique() {
        let mut node = Node::new("n").with_attribute("a", "1").with_attribute("b", "2");
        node.set_attribute("a", "3");

        assert_eq!(node.attributes().len(), 2);
        assert_eq!(node.attribute("a"), Some("3"));
        assert_eq!(node.attributes()[0].name, "a");
    }

    #[test]
    fn child_lookup() {
        let mut node = Node::new("root")
            .with_child(Node::primitive("x", "1"))
            .with_child(Node::primitive("y", "2"));

        assert_eq!(node.child("y").and_then(Node::value), Some("2"));
        assert!(node.child("z").is_none());

        let x = node.take_child("x").unwrap();
        assert_eq!(x.value(), Some("1"));
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn display_as_markup() {
        let node = Node::new("P").with_child(Node::primitive("x", "3"));
        assert_eq!(node.to_string(), "<P>\n  <x Value=\"3\"/>\n</P>");
    }
}
