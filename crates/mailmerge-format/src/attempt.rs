/*
 * attempt.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Outcome of one date or number formatting attempt.

/// The result of parsing a value and applying a pattern to it.
///
/// Parse and pattern failures are ordinary outcomes here, not errors: the
/// field merger turns each of them into its own diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatAttempt {
    /// The formatted text.
    Formatted(String),

    /// The value could not be parsed; carries the parser's message.
    ParseError(String),

    /// The pattern could not be applied; carries the formatter's message.
    FormatError(String),
}

impl FormatAttempt {
    /// Build an attempt from a parse result and a formatting step.
    pub fn from_steps<T>(
        parsed: Result<T, String>,
        format: impl FnOnce(T) -> Result<String, String>,
    ) -> Self {
        match parsed {
            Err(message) => FormatAttempt::ParseError(message),
            Ok(value) => match format(value) {
                Ok(text) => FormatAttempt::Formatted(text),
                Err(message) => FormatAttempt::FormatError(message),
            },
        }
    }

    pub fn formatted(&self) -> Option<&str> {
        match self {
            FormatAttempt::Formatted(text) => Some(text),
            _ => None,
        }
    }
}
