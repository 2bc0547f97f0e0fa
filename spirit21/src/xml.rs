//!
//! # Xml Output Tree
//!
//! A small typed element tree for descriptor construction. Built top-down through
//! owning builder methods: child nodes are appended to a parent and never mutated
//! after attachment. Serialization to text lives in [crate::write].
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// # Xml Element
///
/// A named element with ordered attributes and ordered children.
/// Attribute and child order are significant and preserved verbatim on write.
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Element {
    /// Element Name, including any namespace prefix
    pub name: String,
    /// Attributes, in emission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    /// Child nodes, in emission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// # Xml Node
///
/// Child-node alternatives: a nested [Element] or a text chunk.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    /// Create a new, empty [Element] named `name`.
    pub fn new(name: impl Into<String>) -> Element {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Create an [Element] named `name` holding the sole text child `text`.
    pub fn text_elem(name: impl Into<String>, text: impl ToString) -> Element {
        Element::new(name).text(text)
    }
    /// Append attribute `key`=`value`, returning the updated element.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Element {
        self.attrs.push((key.into(), value.to_string()));
        self
    }
    /// Append child element `child`, returning the updated element.
    pub fn child(mut self, child: Element) -> Element {
        self.children.push(Node::Element(child));
        self
    }
    /// Append each of `kids` as child elements, returning the updated element.
    pub fn kids(mut self, kids: impl IntoIterator<Item = Element>) -> Element {
        for kid in kids {
            self.children.push(Node::Element(kid));
        }
        self
    }
    /// Append a text child, returning the updated element.
    pub fn text(mut self, text: impl ToString) -> Element {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    // Queries, primarily serving tests and downstream inspection

    /// Iterate over child elements (skipping text nodes).
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
    /// First child element named `name`, if any.
    pub fn first(&self, name: &str) -> Option<&Element> {
        self.elems().find(|e| e.name == name)
    }
    /// All child elements named `name`.
    pub fn all<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Element> {
        let name = name.to_string();
        self.elems().filter(move |e| e.name == name)
    }
    /// Concatenation-free text content: the first text child, if any.
    pub fn text_content(&self) -> Option<&str> {
        self.children.iter().find_map(|n| match n {
            Node::Text(t) => Some(t.as_str()),
            Node::Element(_) => None,
        })
    }
    /// Value of attribute `key`, if present.
    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Implement the serialization to/from file trait for descriptor trees
impl crate::utils::SerdeFile for Element {}
