//! Core types for XML data documents.

/// A parsed XML data document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,
}

/// An XML element.
///
/// Children keep their document order, and text children are kept verbatim
/// (including whitespace-only text between elements).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g., "inv" in `<inv:Line>`).
    pub prefix: Option<String>,

    /// Attributes of this element.
    pub attributes: Vec<XmlAttribute>,

    /// Child content of this element, in document order.
    pub children: Vec<XmlNode>,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any.
    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// A single child node of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// A child element.
    Element(XmlElement),

    /// Text content (after unescaping; CDATA sections are stored as text too).
    Text(String),
}

impl XmlDocument {
    /// Create a new document from its root element.
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }
}

impl XmlElement {
    /// Create a new empty element with the given local name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute, returning the element (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(XmlAttribute::new(name, value));
        self
    }

    /// Append a child element, returning the element (builder style).
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append a text node, returning the element (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Get an attribute value by local name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterate over the child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// The first child element with exactly this local name.
    pub fn element(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with exactly this local name.
    pub fn get_children(&self, name: &str) -> Vec<&XmlElement> {
        self.elements().filter(|e| e.name == name).collect()
    }

    /// Check if this element has at least one child element.
    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Check if this element has no children at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The concatenated text of all descendant text nodes, in document order.
    pub fn value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }
}

impl XmlAttribute {
    /// Create a new attribute without a namespace prefix.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }
}
