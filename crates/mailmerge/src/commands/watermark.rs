//! Watermark command implementation

use anyhow::{Context, Result};
use mailmerge_format::{ImageResolver, MergeConfig, Size, resolve_watermark, watermark_path};
use mailmerge_xml::XmlDocument;

/// Report the watermark of a data document, sized to fit the page.
pub fn execute(
    doc: &XmlDocument,
    config: &MergeConfig,
    page_width: f64,
    page_height: f64,
) -> Result<Vec<String>> {
    let Some(path) = watermark_path(&doc.root) else {
        return Ok(vec!["no watermark".to_string()]);
    };

    let resolver = ImageResolver::new(config.image.clone());
    let picture = resolve_watermark(&resolver, &path, Size::new(page_width, page_height))
        .with_context(|| format!("Failed to load watermark {}", path))?;

    tracing::info!(path = %path, "watermark");
    Ok(vec![format!(
        "watermark: {} ({}x{})",
        path, picture.size.width, picture.size.height
    )])
}
