//! Field command implementation

use anyhow::{Result, bail};
use mailmerge_format::{FieldMerger, MergeConfig, MergeField};
use mailmerge_source::{DataSourceNode, LookupResult};
use mailmerge_xml::XmlDocument;

use super::{describe_inline, describe_lookup};

/// Resolve one field and run it through the merge pipeline.
///
/// With `range`, the field is resolved inside the first record of that
/// range, so `$parentContext.` keys reach the root record.
pub fn execute(
    doc: &XmlDocument,
    config: MergeConfig,
    field_name: &str,
    instruction: Option<&str>,
    range: Option<&str>,
) -> Result<Vec<String>> {
    let mut field = MergeField::new(field_name);
    if let Some(instruction) = instruction {
        field = field.with_instruction(instruction);
    }
    let merger = FieldMerger::new(config);

    let mut root = DataSourceNode::root(&doc.root);
    root.advance();

    let Some(range) = range else {
        return Ok(merge(&merger, &field, &root.lookup(field_name)));
    };

    let LookupResult::Range(mut node) = root.lookup(range) else {
        bail!("'{}' is not a range in this document", range);
    };
    if !node.advance() {
        bail!("Range '{}' has no records", range);
    }
    tracing::debug!(range = node.name(), records = node.len(), "merging inside range");
    Ok(merge(&merger, &field, &node.lookup(field_name)))
}

fn merge(merger: &FieldMerger, field: &MergeField, value: &LookupResult<'_>) -> Vec<String> {
    let inline = merger.merge_field(field, value);
    vec![
        format!("value: {}", describe_lookup(value)),
        describe_inline(inline.as_ref()),
    ]
}
