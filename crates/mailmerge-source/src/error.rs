/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for field parameters.

use thiserror::Error;

/// A field parameter whose value cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The value is not a valid number.
    #[error("Parameter '{key}' has invalid numeric value '{value}'")]
    InvalidNumber { key: String, value: String },
}
