/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for image loading and configuration.

use std::path::PathBuf;

use mailmerge_source::ParameterError;
use thiserror::Error;

/// Errors that can occur while loading an image for a field or watermark.
///
/// These are caught at the field boundary and rendered as diagnostic text.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The image file could not be opened or read.
    #[error("Could not open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The image data could not be decoded.
    #[error("Could not decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// A `w` or `h` field parameter is not a number.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Could not read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`MergeConfig`](crate::MergeConfig).
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A culture identifier that is not supported.
    #[error("Unknown culture: {0}")]
    UnknownCulture(String),
}
