/*
 * diagnostic.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostic text written into the document in place of a failed field.
//!
//! Every diagnostic is a single line: carriage returns, line feeds and tabs
//! are removed so the text cannot break the surrounding layout.

use crate::config::MergeConfig;
use crate::error::ImageError;

/// Placeholder for a formatted field whose value is empty.
pub const EMPTY_VALUE: &str = "(EMPTY VALUE)";

/// Remove `\r`, `\n` and `\t`.
pub fn single_line(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect()
}

/// A date value that could not be parsed.
pub fn date_parse_error(value: &str, message: &str, config: &MergeConfig) -> String {
    single_line(&format!(
        "(PARSE ERROR: {} - {} - {}/{})",
        value, message, config.culture, config.ui_culture
    ))
}

/// A parsed date that could not be rendered with `pattern`.
pub fn date_format_error(pattern: &str, message: &str, config: &MergeConfig) -> String {
    single_line(&format!(
        "(INVALID FORMAT: {} - {}-{}/{})",
        pattern, message, config.culture, config.ui_culture
    ))
}

/// A number that could not be parsed or rendered with `pattern`.
pub fn number_error(pattern: &str) -> String {
    single_line(&format!("(INVALID FORMAT: {})", pattern))
}

/// An image that could not be loaded.
pub fn image_error(err: &ImageError) -> String {
    format!("Failed to load image: {}", single_line(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\r\nb\tc\n"), "abc");
        assert_eq!(single_line("plain"), "plain");
    }

    #[test]
    fn test_date_parse_error_embeds_cultures() {
        let text = date_parse_error("not-a-date", "bad", &MergeConfig::default());
        assert_eq!(text, "(PARSE ERROR: not-a-date - bad - en-US/en-US)");
    }

    #[test]
    fn test_date_format_error_layout() {
        let text = date_format_error("q", "Input string was not in a correct format.", &MergeConfig::default());
        assert_eq!(
            text,
            "(INVALID FORMAT: q - Input string was not in a correct format.-en-US/en-US)"
        );
    }

    #[test]
    fn test_value_with_newline_stays_on_one_line() {
        let text = date_parse_error("line1\nline2", "bad", &MergeConfig::default());
        assert!(!text.contains('\n'));
        assert!(text.contains("line1line2"));
    }

    #[test]
    fn test_image_error_text() {
        let err = ImageError::Io {
            path: "/missing.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone\r\naway"),
        };
        assert_eq!(
            image_error(&err),
            "Failed to load image: Could not open '/missing.png': goneaway"
        );
    }
}
