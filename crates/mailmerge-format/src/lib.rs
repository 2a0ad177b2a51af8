/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-field formatting for mail merge.
//!
//! Once a merge field's key has been resolved to a
//! [`LookupResult`](mailmerge_source::LookupResult), this crate decides what
//! the field turns into in the output document:
//!
//! - Date and number pictures embedded in the field instruction
//!   (`MERGEFIELD Date \@ "d MMMM yyyy"`, `MERGEFIELD Total \# "#,##0.00"`)
//! - Blank runs for empty values, unless the field ends in `$omitIfEmpty`
//! - Page breaks for fields ending in `$pageBreakIfNotEmpty`
//! - Images, scaled to fit the `w`/`h` field parameters
//!
//! Formatting faults never propagate: they become single-line diagnostic
//! runs in the output, so one bad field cannot abort a merge.
//!
//! The entry point is [`FieldMerger::merge_field`].

pub mod attempt;
pub mod config;
pub mod culture;
pub mod date;
pub mod diagnostic;
pub mod error;
pub mod format_spec;
pub mod geometry;
pub mod inline;
pub mod merge;
pub mod number;
pub mod picture;
pub mod policy;
pub mod watermark;

// Re-export main types at crate root
pub use attempt::FormatAttempt;
pub use config::{ImageConfig, MergeConfig};
pub use culture::Culture;
pub use error::{ConfigError, ImageError};
pub use format_spec::{FormatKind, FormatSpec};
pub use geometry::{Size, scale_to_fit};
pub use inline::{CharacterFormat, Inline, MergeField, TextRun};
pub use merge::FieldMerger;
pub use picture::{ImageResolver, Picture};
pub use policy::EmptyValuePolicy;
pub use watermark::{resolve_watermark, watermark_path};
