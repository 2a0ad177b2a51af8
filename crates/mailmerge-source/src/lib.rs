/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Merge-field data resolution over XML data documents.
//!
//! A mail-merge driver walks the merge fields of a document and asks a data
//! source for the value of each one. This crate is that data source for XML
//! data documents. It supports:
//!
//! - Dotted paths: `Customer.Address.City`
//! - Repeating ranges with pluralization-aware child matching:
//!   `Invoices` iterates `Invoice` children, `Properties` iterates `Property`
//! - Field parameters: `Logo(w:200,h:100)`
//! - Modifiers:
//!   - `$whitespace` (a single space)
//!   - `$parentContext.Key` (resolve against the enclosing range)
//!   - `LinesContainer` / `Lines$contains` (truthiness of a non-empty range)
//!   - `Note$notEmpty` (truthiness of a non-empty value)
//!   - `Note$asWhitespace` (a single space when the value is non-empty)
//!   - any other trailing `$modifier` is ignored during resolution
//!
//! # Architecture
//!
//! [`DataSourceNode`] is a forward-only cursor over a list of sibling
//! elements. Every lookup returns a [`LookupResult`]; nested ranges borrow
//! the node that produced them, so a range can always reach its parent for
//! `$parentContext` lookups without owning it.
//!
//! # Example
//!
//! ```rust
//! use mailmerge_source::{DataSourceNode, LookupResult};
//!
//! let doc = mailmerge_xml::parse(
//!     "<Root><Invoices><Invoice><Number>1</Number></Invoice></Invoices></Root>",
//! )
//! .unwrap();
//!
//! let mut root = DataSourceNode::root(&doc.root);
//! assert!(root.advance());
//!
//! let LookupResult::Range(mut invoices) = root.lookup("Invoices") else {
//!     panic!("expected a range");
//! };
//! assert!(invoices.advance());
//! assert_eq!(invoices.lookup("Number").as_scalar(), Some("1"));
//! ```

pub mod error;
pub mod lookup;
pub mod modifier;
pub mod node;
pub mod params;
pub mod path;

// Re-export main types at crate root
pub use error::ParameterError;
pub use lookup::{ImageDescriptor, ImageKind, LookupResult};
pub use modifier::{Modifier, strip_parameters, strip_trailing_modifier};
pub use node::DataSourceNode;
pub use params::FieldParameters;
pub use path::{candidate_child_names, matching_children, resolve};
