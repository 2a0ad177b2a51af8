/*
 * format_spec.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Format pictures embedded in a merge field's instruction text.
//!
//! A field instruction such as `MERGEFIELD Date \@ "d MMMM yyyy"` carries a
//! date picture after the `\@` switch, and `MERGEFIELD Total \# "0.00"`
//! carries a number picture after the `\#` switch.

/// Which switch introduces the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Date,
    Number,
}

impl FormatKind {
    /// The switch token, without the surrounding space and quote.
    pub fn token(self) -> &'static str {
        match self {
            FormatKind::Date => "\\@",
            FormatKind::Number => "\\#",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub kind: FormatKind,
    pub pattern: String,
}

impl FormatSpec {
    /// Extract the picture for `kind` from an instruction.
    ///
    /// The picture starts after `" \@ \""` (or `" \# \""`) and runs to the
    /// next `"`, where the search for the closing quote starts one character
    /// into the picture. Returns `None` when the switch is absent, the
    /// picture is unterminated, or the picture is empty.
    pub fn extract(instruction: &str, kind: FormatKind) -> Option<FormatSpec> {
        let delimiter = format!(" {} \"", kind.token());
        let start = instruction.find(&delimiter)? + delimiter.len();
        let rest = &instruction[start..];

        let first_len = rest.chars().next()?.len_utf8();
        let end = first_len + rest[first_len..].find('"')?;

        let pattern = &rest[..end];
        if pattern.is_empty() {
            return None;
        }
        Some(FormatSpec {
            kind,
            pattern: pattern.to_string(),
        })
    }
}
