/*
 * modifier.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lookup-key modifiers.
//!
//! A lookup key is classified by an ordered rule table. The first rule that
//! matches decides how the key is resolved; keys no rule claims are plain
//! dotted paths. The order is significant: `Lines$notEmptyContainer` is a
//! container check, and `$parentContext.Note$notEmpty` is a parent escape.

use std::borrow::Cow;

const WHITESPACE: &str = "$whitespace";
const PARENT_CONTEXT: &str = "$parentContext.";
const CONTAINER: &str = "Container";
const CONTAINS: &str = "$contains";
const NOT_EMPTY: &str = "$notEmpty";
const AS_WHITESPACE: &str = "$asWhitespace";

/// How a lookup key is to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier<'k> {
    /// `$whitespace`: a single space.
    Whitespace,

    /// `$parentContext.<rest>`: resolve `rest` against the parent range.
    /// `rest` is taken from the raw key, parameters included.
    ParentContext { rest: &'k str },

    /// `<target>Container` or `<target>$contains`: succeeds with the current
    /// element when `target` resolves to an element with range children.
    Container { target: &'k str },

    /// `<target>$notEmpty`: succeeds with the current element when
    /// `target` has a non-empty value.
    NotEmpty { target: &'k str },

    /// `<target>$asWhitespace`: a single space when `target` has a
    /// non-empty value.
    AsWhitespace { target: &'k str },

    /// A plain dotted path (any trailing `$modifier` already removed).
    Path { path: &'k str },
}

/// A rule receives the raw key and the key with its parameters removed.
type Rule = for<'k> fn(&'k str, &'k str) -> Option<Modifier<'k>>;

const RULES: [Rule; 5] = [
    whitespace_rule,
    parent_context_rule,
    container_rule,
    not_empty_rule,
    as_whitespace_rule,
];

impl<'k> Modifier<'k> {
    /// Classify a key. `stripped` must be `raw` after [`strip_parameters`].
    pub fn classify(raw: &'k str, stripped: &'k str) -> Modifier<'k> {
        RULES
            .iter()
            .find_map(|rule| rule(raw, stripped))
            .unwrap_or_else(|| Modifier::Path {
                path: strip_trailing_modifier(stripped),
            })
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Whitespace => "whitespace",
            Modifier::ParentContext { .. } => "parent context",
            Modifier::Container { .. } => "container check",
            Modifier::NotEmpty { .. } => "not-empty check",
            Modifier::AsWhitespace { .. } => "as-whitespace",
            Modifier::Path { .. } => "path",
        }
    }
}

fn whitespace_rule<'k>(_raw: &'k str, stripped: &'k str) -> Option<Modifier<'k>> {
    stripped
        .eq_ignore_ascii_case(WHITESPACE)
        .then_some(Modifier::Whitespace)
}

fn parent_context_rule<'k>(raw: &'k str, stripped: &'k str) -> Option<Modifier<'k>> {
    if !stripped.starts_with(PARENT_CONTEXT) {
        return None;
    }
    // Parameters never precede the prefix, so the raw key starts with it too.
    let rest = raw.get(PARENT_CONTEXT.len()..).unwrap_or_default();
    Some(Modifier::ParentContext { rest })
}

fn container_rule<'k>(_raw: &'k str, stripped: &'k str) -> Option<Modifier<'k>> {
    stripped
        .strip_suffix(CONTAINER)
        .or_else(|| stripped.strip_suffix(CONTAINS))
        .map(|target| Modifier::Container { target })
}

fn not_empty_rule<'k>(_raw: &'k str, stripped: &'k str) -> Option<Modifier<'k>> {
    stripped
        .strip_suffix(NOT_EMPTY)
        .map(|target| Modifier::NotEmpty { target })
}

fn as_whitespace_rule<'k>(_raw: &'k str, stripped: &'k str) -> Option<Modifier<'k>> {
    stripped
        .strip_suffix(AS_WHITESPACE)
        .map(|target| Modifier::AsWhitespace { target })
}

/// Remove the parameter list from a key.
///
/// The removed span runs from the first `(` to the last `)`; anything after
/// it is kept, so `Logo(w:10)$omitIfEmpty` becomes `Logo$omitIfEmpty`.
pub fn strip_parameters(key: &str) -> Cow<'_, str> {
    let Some(open) = key.find('(') else {
        return Cow::Borrowed(key);
    };
    match key.rfind(')') {
        Some(close) if close > open => {
            Cow::Owned(format!("{}{}", &key[..open], &key[close + 1..]))
        }
        _ => Cow::Borrowed(key),
    }
}

/// Remove a trailing `$modifier` from a path.
///
/// Only a `$` after the first character counts, so a key that starts with
/// `$` and has no other `$` is returned unchanged.
pub fn strip_trailing_modifier(path: &str) -> &str {
    match path.rfind('$') {
        Some(pos) if pos > 0 => &path[..pos],
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(key: &str) -> Modifier<'_> {
        // Tests only use keys without parameters.
        Modifier::classify(key, key)
    }

    #[test]
    fn test_whitespace_is_case_insensitive() {
        assert_eq!(classify("$whitespace"), Modifier::Whitespace);
        assert_eq!(classify("$WhiteSpace"), Modifier::Whitespace);
        assert_eq!(classify("$WHITESPACE"), Modifier::Whitespace);
    }

    #[test]
    fn test_parent_context_takes_raw_rest() {
        let raw = "$parentContext.Logo(w:10)";
        let stripped = strip_parameters(raw);
        assert_eq!(
            Modifier::classify(raw, &stripped),
            Modifier::ParentContext { rest: "Logo(w:10)" }
        );
    }

    #[test]
    fn test_parent_context_wins_over_suffixes() {
        assert_eq!(
            classify("$parentContext.Note$notEmpty"),
            Modifier::ParentContext {
                rest: "Note$notEmpty"
            }
        );
    }

    #[test]
    fn test_container_suffixes() {
        assert_eq!(
            classify("Quality.DetailsContainer"),
            Modifier::Container {
                target: "Quality.Details"
            }
        );
        assert_eq!(
            classify("Lines$contains"),
            Modifier::Container { target: "Lines" }
        );
    }

    #[test]
    fn test_container_wins_over_not_empty() {
        assert_eq!(
            classify("Note$notEmptyContainer"),
            Modifier::Container {
                target: "Note$notEmpty"
            }
        );
    }

    #[test]
    fn test_not_empty_and_as_whitespace() {
        assert_eq!(classify("Note$notEmpty"), Modifier::NotEmpty { target: "Note" });
        assert_eq!(
            classify("Title$asWhitespace"),
            Modifier::AsWhitespace { target: "Title" }
        );
    }

    #[test]
    fn test_unknown_modifier_is_stripped() {
        assert_eq!(
            classify("Customer.Name$omitIfEmpty"),
            Modifier::Path {
                path: "Customer.Name"
            }
        );
        assert_eq!(classify("Name$a$b"), Modifier::Path { path: "Name$a" });
        assert_eq!(classify("Customer.Name"), Modifier::Path { path: "Customer.Name" });
    }

    #[test]
    fn test_leading_dollar_is_kept() {
        assert_eq!(classify("$unknown"), Modifier::Path { path: "$unknown" });
        assert_eq!(strip_trailing_modifier("$a$b"), "$a");
    }

    #[test]
    fn test_strip_parameters() {
        assert_eq!(strip_parameters("Logo(w:200,h:100)"), "Logo");
        assert_eq!(strip_parameters("Logo(w:1)$omitIfEmpty"), "Logo$omitIfEmpty");
        assert_eq!(strip_parameters("A(x:1).B(y:2)"), "A");
        assert_eq!(strip_parameters("Logo(w:1"), "Logo(w:1");
        assert_eq!(strip_parameters("Logo"), "Logo");
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(classify("$whitespace").name(), "whitespace");
        assert_eq!(classify("X$contains").name(), "container check");
        assert_eq!(classify("X").name(), "path");
    }
}
