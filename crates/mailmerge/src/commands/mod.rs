//! Command implementations for the mailmerge CLI
//!
//! Each command returns the lines to print, one per result.

pub mod field;
pub mod lookup;
pub mod watermark;

use std::path::Path;

use anyhow::{Context, Result};
use mailmerge_format::Inline;
use mailmerge_source::LookupResult;
use mailmerge_xml::XmlDocument;

/// Parse a data document from disk.
pub fn load_data(path: &Path) -> Result<XmlDocument> {
    mailmerge_xml::parse_file(path)
        .with_context(|| format!("Failed to load data document {}", path.display()))
}

pub fn describe_lookup(result: &LookupResult<'_>) -> String {
    match result {
        LookupResult::Scalar(value) => format!("scalar: {:?}", value),
        LookupResult::Range(range) => format!("range: {} ({} elements)", range.name(), range.len()),
        LookupResult::ImageRef(descriptor) => match &descriptor.path {
            Some(path) => format!("image: {}", path),
            None => format!("image: ({:?}, no path)", descriptor.kind),
        },
        LookupResult::NotFound => "not found".to_string(),
    }
}

pub fn describe_inline(inline: Option<&Inline>) -> String {
    match inline {
        None => "nothing".to_string(),
        Some(Inline::Run(run)) => format!("run: {:?}", run.text),
        Some(Inline::Picture(picture)) => {
            format!("picture: {}x{}", picture.size.width, picture.size.height)
        }
        Some(Inline::PageBreak) => "page break".to_string(),
    }
}
