/*
 * watermark.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Watermark lookup and sizing. Compositing the watermark onto pages is
//! left to the caller.

use mailmerge_source::resolve;
use mailmerge_xml::XmlElement;

use crate::error::ImageError;
use crate::geometry::Size;
use crate::picture::{ImageResolver, Picture};

/// Where the watermark image path lives in a data document.
pub const WATERMARK_PATH: &str = "Processing.Watermark";

/// The watermark image path of a data document, if one is set.
pub fn watermark_path(root: &XmlElement) -> Option<String> {
    resolve(WATERMARK_PATH, root)
        .map(XmlElement::value)
        .filter(|path| !path.is_empty())
}

/// Load the watermark and size it to fit the page.
pub fn resolve_watermark(
    resolver: &ImageResolver,
    path: &str,
    page: Size,
) -> Result<Picture, ImageError> {
    Ok(resolver.load(path)?.fit(page.width, page.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageConfig;

    #[test]
    fn test_watermark_path() {
        let doc = mailmerge_xml::parse(
            "<Root><Processing><Watermark>/srv/draft.png</Watermark></Processing></Root>",
        )
        .unwrap();
        assert_eq!(watermark_path(&doc.root), Some("/srv/draft.png".to_string()));
    }

    #[test]
    fn test_missing_or_empty_watermark() {
        let empty = mailmerge_xml::parse("<Root><Processing><Watermark/></Processing></Root>").unwrap();
        assert_eq!(watermark_path(&empty.root), None);

        let absent = mailmerge_xml::parse("<Root><Processing/></Root>").unwrap();
        assert_eq!(watermark_path(&absent.root), None);
    }

    #[test]
    fn test_resolve_watermark_fits_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.png");
        image::RgbImage::new(300, 300).save(&path).unwrap();

        let resolver = ImageResolver::new(ImageConfig {
            dpi: 72.0,
            ..ImageConfig::default()
        });
        let picture =
            resolve_watermark(&resolver, &path.to_string_lossy(), Size::new(600.0, 842.0)).unwrap();
        assert_eq!(picture.size, Size::new(600.0, 600.0));
    }
}
