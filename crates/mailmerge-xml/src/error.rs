//! Error types for XML data documents.

use thiserror::Error;

/// Result type alias for mailmerge-xml operations.
pub type Result<T> = std::result::Result<T, XmlError>;

/// Errors that can occur while loading a data document.
#[derive(Debug, Error)]
pub enum XmlError {
    /// XML syntax error from quick-xml.
    #[error("XML syntax error: {message}{}", byte_suffix(.position))]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Mismatched end tag.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Invalid XML structure.
    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// Empty document (no root element).
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// Multiple root elements.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,

    /// I/O error reading a document from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn byte_suffix(position: &Option<u64>) -> String {
    match position {
        Some(pos) => format!(" at byte {}", pos),
        None => String::new(),
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
