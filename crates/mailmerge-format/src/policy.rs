/*
 * policy.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Empty-value and page-break policies.
//!
//! These use whitespace emptiness: a value of only spaces is blank. Lookup
//! modifiers such as `$notEmpty` use strict emptiness instead, where only a
//! zero-length value is empty.

use mailmerge_source::LookupResult;

pub const OMIT_IF_EMPTY: &str = "$omitIfEmpty";
pub const DONT_OMIT_IF_EMPTY: &str = "$dontOmitIfEmpty";
pub const PAGE_BREAK_IF_NOT_EMPTY: &str = "$pageBreakIfNotEmpty";

/// What to emit for a found, blank scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyValuePolicy {
    /// Emit a zero-length run so the surrounding layout is kept.
    #[default]
    BlankRun,

    /// Emit nothing and leave the field to the driver's cleanup pass.
    Omit,
}

impl EmptyValuePolicy {
    pub fn for_field(field_name: &str) -> Self {
        if field_name.ends_with(OMIT_IF_EMPTY) {
            EmptyValuePolicy::Omit
        } else {
            // `$dontOmitIfEmpty` and unmarked fields alike.
            EmptyValuePolicy::BlankRun
        }
    }
}

/// A found scalar that is empty or whitespace only.
pub fn is_blank(value: &LookupResult<'_>) -> bool {
    value.as_scalar().is_some_and(|s| s.trim().is_empty())
}

/// Whether a field forces a page break for this value.
pub fn wants_page_break(field_name: &str, value: &LookupResult<'_>) -> bool {
    field_name.ends_with(PAGE_BREAK_IF_NOT_EMPTY) && value.is_found() && !is_blank(value)
}
