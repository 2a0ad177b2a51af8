/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Merge configuration.
//!
//! All keys are optional:
//!
//! ```toml
//! culture = "en-US"        # formatting output, reported in diagnostics
//! ui-culture = "en-US"     # reported in diagnostics
//! parse-culture = "nl-BE"  # free date parsing fallback
//!
//! [image]
//! default-width = 10000.0
//! default-height = 10000.0
//! dpi = 96.0
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::culture::Culture;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MergeConfig {
    pub culture: Culture,
    pub ui_culture: Culture,
    pub parse_culture: Culture,
    pub image: ImageConfig,
}

/// Image sizing defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImageConfig {
    /// Target width when a field has no `w` parameter, in layout points.
    pub default_width: f64,
    /// Target height when a field has no `h` parameter, in layout points.
    pub default_height: f64,
    /// Pixels per inch for converting decoded pixel sizes to points.
    pub dpi: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            culture: Culture::EnUs,
            ui_culture: Culture::EnUs,
            parse_culture: Culture::NlBe,
            image: ImageConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_width: 10000.0,
            default_height: 10000.0,
            dpi: 96.0,
        }
    }
}

impl MergeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
