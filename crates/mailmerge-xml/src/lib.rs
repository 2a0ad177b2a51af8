//! XML data documents for mail-merge field resolution.
//!
//! This crate wraps [`quick-xml`] to produce an owned tree of [`XmlElement`]s.
//! The tree is the read-only input that merge-field lookups navigate: every
//! element keeps its local name, its attributes, and its element and text
//! children in document order.
//!
//! Whitespace-only text is preserved. An element's [`XmlElement::value`] is
//! the concatenation of all descendant text, so `<Note>  </Note>` has the
//! value `"  "` and not `""`.
//!
//! # Example
//!
//! ```rust
//! use mailmerge_xml::parse;
//!
//! let doc = parse(r#"<Invoice><Number>42</Number><Logo Type="ImageRef"/></Invoice>"#).unwrap();
//!
//! assert_eq!(doc.root.name, "Invoice");
//! assert_eq!(doc.root.element("Number").map(|e| e.value()), Some("42".to_string()));
//! assert_eq!(
//!     doc.root.element("Logo").and_then(|e| e.get_attribute("Type")),
//!     Some("ImageRef")
//! );
//! ```

pub mod error;
pub mod parser;
pub mod types;

pub use error::{Result, XmlError};
pub use parser::{parse, parse_file};
pub use types::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
