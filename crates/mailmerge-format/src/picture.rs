/*
 * picture.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading and sizing images for image fields.

use image::GenericImageView;
use mailmerge_source::{FieldParameters, ImageDescriptor};

use crate::config::ImageConfig;
use crate::error::ImageError;
use crate::geometry::{Size, scale_to_fit};

/// Points per inch of the layout unit.
const POINTS_PER_INCH: f64 = 72.0;

/// An image ready to embed: the encoded bytes and the display size.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub data: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Display size in points.
    pub size: Size,
}

impl Picture {
    /// Scale the display size to fit inside `width` x `height`.
    pub fn fit(mut self, width: f64, height: f64) -> Self {
        self.size = scale_to_fit(self.size, width, height);
        self
    }
}

/// Resolves image descriptors to pictures.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    config: ImageConfig,
}

impl ImageResolver {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Load the image named by `descriptor`, sized by the field's `w` and
    /// `h` parameters.
    ///
    /// Returns `Ok(None)` when the descriptor has no stream (an inline
    /// image, or an empty path), which suppresses the field.
    pub fn resolve(
        &self,
        descriptor: &ImageDescriptor,
        parameters: &FieldParameters,
    ) -> Result<Option<Picture>, ImageError> {
        let Some(path) = descriptor.file_path() else {
            tracing::debug!(kind = ?descriptor.kind, "image without stream");
            return Ok(None);
        };

        let picture = self.load(path)?;
        let width = parameters.get_f64("w", self.config.default_width)?;
        let height = parameters.get_f64("h", self.config.default_height)?;
        Ok(Some(picture.fit(width, height)))
    }

    /// Read and decode an image file. The display size is the natural size
    /// at the configured DPI.
    pub fn load(&self, path: &str) -> Result<Picture, ImageError> {
        let data = std::fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_string(),
            source,
        })?;
        let decoded = image::load_from_memory(&data).map_err(|source| ImageError::Decode {
            path: path.to_string(),
            source,
        })?;

        let (pixel_width, pixel_height) = decoded.dimensions();
        let size = Size::new(
            self.to_points(pixel_width),
            self.to_points(pixel_height),
        );
        tracing::debug!(path, pixel_width, pixel_height, "loaded image");

        Ok(Picture {
            data,
            pixel_width,
            pixel_height,
            size,
        })
    }

    fn to_points(&self, pixels: u32) -> f64 {
        f64::from(pixels) * POINTS_PER_INCH / self.config.dpi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailmerge_source::ImageKind;
    use std::path::Path;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> String {
        let path = dir.join(name);
        image::RgbImage::new(width, height).save(&path).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn resolver_at_72_dpi() -> ImageResolver {
        ImageResolver::new(ImageConfig {
            dpi: 72.0,
            ..ImageConfig::default()
        })
    }

    #[test]
    fn test_natural_size_uses_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "logo.png", 400, 200);

        let picture = ImageResolver::default().load(&path).unwrap();
        assert_eq!((picture.pixel_width, picture.pixel_height), (400, 200));
        assert_eq!(picture.size, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_resolve_scales_to_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "logo.png", 400, 200);

        let picture = resolver_at_72_dpi()
            .resolve(
                &ImageDescriptor::image_ref(path),
                &FieldParameters::from_field_name("Logo(w:100,h:100)"),
            )
            .unwrap()
            .unwrap();
        assert_eq!(picture.size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_resolve_defaults_to_large_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "logo.png", 400, 200);

        let picture = resolver_at_72_dpi()
            .resolve(&ImageDescriptor::image_ref(path), &FieldParameters::default())
            .unwrap()
            .unwrap();
        assert_eq!(picture.size, Size::new(10000.0, 5000.0));
    }

    #[test]
    fn test_no_stream() {
        let resolver = ImageResolver::default();
        let params = FieldParameters::default();

        let inline = ImageDescriptor {
            kind: ImageKind::Inline,
            path: None,
        };
        assert!(resolver.resolve(&inline, &params).unwrap().is_none());
        assert!(
            resolver
                .resolve(&ImageDescriptor::image_ref(""), &params)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_failures() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ImageResolver::default();
        let params = FieldParameters::default();

        let missing = dir.path().join("missing.png").to_string_lossy().into_owned();
        let err = resolver
            .resolve(&ImageDescriptor::image_ref(missing), &params)
            .unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));

        let junk = dir.path().join("junk.png");
        std::fs::write(&junk, b"not an image").unwrap();
        let err = resolver
            .resolve(&ImageDescriptor::image_ref(junk.to_string_lossy()), &params)
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));

        let path = write_png(dir.path(), "ok.png", 4, 4);
        let err = resolver
            .resolve(
                &ImageDescriptor::image_ref(path),
                &FieldParameters::from_field_name("Logo(w:wide)"),
            )
            .unwrap_err();
        assert!(matches!(err, ImageError::Parameter(_)));
    }
}
