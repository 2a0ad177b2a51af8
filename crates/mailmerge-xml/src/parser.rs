//! XML parser that builds XmlDocument trees.

use crate::{Result, XmlAttribute, XmlDocument, XmlElement, XmlError, XmlNode};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use std::path::Path;

/// Parse XML from a string, producing an XmlDocument tree.
///
/// # Example
///
/// ```rust
/// use mailmerge_xml::parse;
///
/// let doc = parse("<Invoices><Invoice/></Invoices>").unwrap();
/// assert_eq!(doc.root.name, "Invoices");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed or if parsing fails.
pub fn parse(content: &str) -> Result<XmlDocument> {
    let mut parser = XmlParser::new(content);
    parser.parse()
}

/// Read and parse an XML document from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<XmlDocument> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<XmlElement>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            let event_start = self.reader.buffer_position();

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = self.start_element(&e)?;
                    self.stack.push(element);
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.start_element(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(e);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmlError::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(XmlError::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
            });
        }

        let root = root.ok_or(XmlError::EmptyDocument)?;
        Ok(XmlDocument::new(root))
    }

    /// Attach a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlNode::Element(element));
                Ok(())
            }
            None if root.is_some() => Err(XmlError::MultipleRoots),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn start_element(&self, e: &BytesStart<'_>) -> Result<XmlElement> {
        let (name, prefix) = split_name(&String::from_utf8_lossy(e.name().as_ref()));
        let attributes = self.parse_attributes(e)?;

        Ok(XmlElement {
            name,
            prefix,
            attributes,
            children: Vec::new(),
        })
    }

    fn handle_end(&mut self, e: BytesEnd<'_>) -> Result<XmlElement> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let end_local_name = end_name.split(':').next_back().unwrap_or(&end_name);

        let node = self.stack.pop().ok_or_else(|| XmlError::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        if node.name != end_local_name {
            return Err(XmlError::MismatchedEndTag {
                expected: node.name,
                found: end_local_name.to_string(),
            });
        }

        Ok(node)
    }

    fn handle_text(&mut self, e: BytesText<'_>, event_start: u64) -> Result<()> {
        let text = e.unescape().map_err(|err| XmlError::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start),
        })?;

        // Text outside the root element carries no data.
        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlNode::Text(text.into_owned()));
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: BytesCData<'_>) {
        let text = String::from_utf8_lossy(e.as_ref()).to_string();

        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlNode::Text(text));
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>) -> Result<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result?;
            let (name, prefix) = split_name(&String::from_utf8_lossy(attr.key.as_ref()));

            let value = attr.unescape_value().map_err(|err| XmlError::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;

            attributes.push(XmlAttribute {
                name,
                prefix,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }
}

/// Split a qualified name into its local name and optional prefix.
fn split_name(full_name: &str) -> (String, Option<String>) {
    match full_name.find(':') {
        Some(pos) => (
            full_name[pos + 1..].to_string(),
            Some(full_name[..pos].to_string()),
        ),
        None => (full_name.to_string(), None),
    }
}
