/*
 * params.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Field parameters: `Logo(w:200,h:100)`.

use std::collections::HashMap;

use crate::error::ParameterError;

/// Key/value parameters parsed from the parenthesized suffix of a field name.
///
/// Parameters never take part in resolution; they are consumed by field
/// formatting (for example image sizing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldParameters {
    values: HashMap<String, String>,
}

impl FieldParameters {
    /// Parse the parameter list of a field name.
    ///
    /// The list runs from the first `(` to the next `)`, and holds
    /// comma-separated `key:value` pairs. Keys and values are kept verbatim.
    /// A missing, empty, or malformed list (an unclosed `(`, a pair without
    /// `:`, a repeated key) yields no parameters.
    pub fn from_field_name(field_name: &str) -> Self {
        parse_parameter_list(field_name).unwrap_or_default()
    }

    /// Get a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a numeric parameter, or `default` when it is absent.
    ///
    /// Surrounding whitespace in the value is ignored.
    pub fn get_f64(&self, key: &str, default: f64) -> Result<f64, ParameterError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| ParameterError::InvalidNumber {
                    key: key.to_string(),
                    value: value.clone(),
                }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_parameter_list(field_name: &str) -> Option<FieldParameters> {
    let open = field_name.find('(')?;
    let close = open + field_name[open..].find(')')?;
    let list = &field_name[open + 1..close];
    if list.is_empty() {
        return None;
    }

    let mut values = HashMap::new();
    for pair in list.split(',') {
        let mut parts = pair.split(':');
        let key = parts.next()?;
        let value = parts.next()?;
        if values.insert(key.to_string(), value.to_string()).is_some() {
            return None;
        }
    }
    Some(FieldParameters { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_width_and_height() {
        let params = FieldParameters::from_field_name("Logo(w:200,h:100)");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("w"), Some("200"));
        assert_eq!(params.get("h"), Some("100"));
        assert_eq!(params.get_f64("w", 10000.0), Ok(200.0));
        assert_eq!(params.get_f64("h", 10000.0), Ok(100.0));
    }

    #[test]
    fn test_missing_parameter_uses_default() {
        let params = FieldParameters::from_field_name("Logo(w:200)");
        assert_eq!(params.get_f64("h", 10000.0), Ok(10000.0));
    }

    #[test]
    fn test_no_parameter_list() {
        assert!(FieldParameters::from_field_name("Logo").is_empty());
        assert!(FieldParameters::from_field_name("Logo()").is_empty());
    }

    #[test]
    fn test_malformed_lists_are_empty() {
        assert!(FieldParameters::from_field_name("Logo(w:200").is_empty());
        assert!(FieldParameters::from_field_name("Logo(w200)").is_empty());
        assert!(FieldParameters::from_field_name("Logo(w:1,w:2)").is_empty());
    }

    #[test]
    fn test_keys_are_not_trimmed() {
        let params = FieldParameters::from_field_name("Logo(w:200, h:100)");
        assert_eq!(params.get("h"), None);
        assert_eq!(params.get(" h"), Some("100"));
    }

    #[test]
    fn test_modifier_after_parameters() {
        let params = FieldParameters::from_field_name("Logo(w:50)$omitIfEmpty");
        assert_eq!(params.get("w"), Some("50"));
    }

    #[test]
    fn test_invalid_number() {
        let params = FieldParameters::from_field_name("Logo(w:wide)");
        assert_eq!(
            params.get_f64("w", 10000.0),
            Err(ParameterError::InvalidNumber {
                key: "w".to_string(),
                value: "wide".to_string(),
            })
        );
    }

    #[test]
    fn test_whitespace_around_numeric_value() {
        let params = FieldParameters::from_field_name("Logo(w: 120 )");
        assert_eq!(params.get_f64("w", 0.0), Ok(120.0));
    }
}
