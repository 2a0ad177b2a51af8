/*
 * lookup.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lookup results and image descriptors.

use mailmerge_xml::XmlElement;

use crate::node::DataSourceNode;

/// Attribute that marks an element as an image.
pub const IMAGE_TYPE_ATTRIBUTE: &str = "Type";

/// Child element holding the file path of an `ImageRef` image.
pub const IMAGE_PATH_ELEMENT: &str = "Path";

/// The outcome of resolving one merge-field key.
///
/// Exactly one variant is produced per lookup. `NotFound` is a controlled
/// miss and never an error.
#[derive(Debug)]
pub enum LookupResult<'a> {
    /// A text value.
    Scalar(String),

    /// A nested range to iterate.
    Range(DataSourceNode<'a>),

    /// An image to embed.
    ImageRef(ImageDescriptor),

    /// The key did not resolve, or a modifier precondition failed.
    NotFound,
}

impl LookupResult<'_> {
    /// Whether the lookup succeeded.
    pub fn is_found(&self) -> bool {
        !matches!(self, LookupResult::NotFound)
    }

    /// The scalar text, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            LookupResult::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The nested range, if this is a range.
    pub fn as_range(&self) -> Option<&DataSourceNode<'_>> {
        match self {
            LookupResult::Range(node) => Some(node),
            _ => None,
        }
    }

    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupResult::Scalar(_) => "scalar",
            LookupResult::Range(_) => "range",
            LookupResult::ImageRef(_) => "image",
            LookupResult::NotFound => "not found",
        }
    }
}

/// How an image is stored in the data document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// `Type="ImageRef"`: a file on disk named by the `Path` child.
    ImageRef,

    /// `Type="Image"`: image data inlined in the document. Recognized, but
    /// never produces a stream.
    Inline,
}

/// An image referenced from the data document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub kind: ImageKind,

    /// File path for `ImageRef` images; `None` when the `Path` child is
    /// missing.
    pub path: Option<String>,
}

impl ImageDescriptor {
    /// A file-backed image descriptor.
    pub fn image_ref(path: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::ImageRef,
            path: Some(path.into()),
        }
    }

    /// Read an image descriptor from an element's `Type` attribute.
    ///
    /// Returns `None` for elements that are not images.
    pub fn from_element(element: &XmlElement) -> Option<Self> {
        match element.get_attribute(IMAGE_TYPE_ATTRIBUTE)? {
            "ImageRef" => Some(Self {
                kind: ImageKind::ImageRef,
                path: element.element(IMAGE_PATH_ELEMENT).map(|p| p.value()),
            }),
            "Image" => Some(Self {
                kind: ImageKind::Inline,
                path: None,
            }),
            _ => None,
        }
    }

    /// The file path to open, if this descriptor names a non-empty one.
    pub fn file_path(&self) -> Option<&str> {
        match self.kind {
            ImageKind::ImageRef => self.path.as_deref().filter(|p| !p.is_empty()),
            ImageKind::Inline => None,
        }
    }
}
