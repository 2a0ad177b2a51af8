/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The per-field merge pipeline.

use mailmerge_source::{FieldParameters, LookupResult};

use crate::attempt::FormatAttempt;
use crate::config::MergeConfig;
use crate::date::format_date_value;
use crate::diagnostic::{self, EMPTY_VALUE};
use crate::format_spec::{FormatKind, FormatSpec};
use crate::inline::{Inline, MergeField, TextRun};
use crate::number::format_number_value;
use crate::picture::ImageResolver;
use crate::policy::{EmptyValuePolicy, is_blank, wants_page_break};

/// Turns resolved field values into inline content.
#[derive(Debug, Clone, Default)]
pub struct FieldMerger {
    config: MergeConfig,
    images: ImageResolver,
}

impl FieldMerger {
    pub fn new(config: MergeConfig) -> Self {
        let images = ImageResolver::new(config.image.clone());
        Self { config, images }
    }

    /// Decide what `field` is replaced with, given its resolved `value`.
    ///
    /// `None` leaves the field to the merge driver. The steps run in order
    /// and each may replace the content chosen by an earlier one:
    ///
    /// 1. Images. A loaded picture, or `None` for an image without a
    ///    stream, is final. A load failure becomes a diagnostic run and the
    ///    remaining steps still run.
    /// 2. A `\@` date picture. Parse and picture failures are final
    ///    diagnostics.
    /// 3. A `\#` number picture.
    /// 4. A found scalar that is blank becomes a zero-length run, unless
    ///    the field name ends in `$omitIfEmpty`.
    /// 5. A field name ending in `$pageBreakIfNotEmpty` becomes a page
    ///    break when the value is found and not blank.
    ///
    /// Formatting only sees scalar text; other values format as empty.
    pub fn merge_field(&self, field: &MergeField, value: &LookupResult<'_>) -> Option<Inline> {
        let mut inline = None;

        if let LookupResult::ImageRef(descriptor) = value {
            let parameters = FieldParameters::from_field_name(&field.name);
            match self.images.resolve(descriptor, &parameters) {
                Ok(picture) => return picture.map(Inline::Picture),
                Err(err) => {
                    tracing::debug!(field = %field.name, error = %err, "image failed");
                    inline = Some(diagnostic_run(diagnostic::image_error(&err)));
                }
            }
        }

        let text = value.as_scalar().unwrap_or_default();

        if let Some(spec) = FormatSpec::extract(&field.instruction, FormatKind::Date) {
            if text.is_empty() {
                inline = Some(diagnostic_run(EMPTY_VALUE.to_string()));
            } else {
                match format_date_value(text, &spec.pattern, &self.config) {
                    FormatAttempt::Formatted(formatted) => {
                        inline = Some(Inline::Run(TextRun::styled(formatted, &field.format)));
                    }
                    FormatAttempt::ParseError(message) => {
                        tracing::debug!(field = %field.name, value = text, %message, "date parse failed");
                        return Some(diagnostic_run(diagnostic::date_parse_error(
                            text,
                            &message,
                            &self.config,
                        )));
                    }
                    FormatAttempt::FormatError(message) => {
                        tracing::debug!(field = %field.name, pattern = %spec.pattern, %message, "date picture failed");
                        return Some(diagnostic_run(diagnostic::date_format_error(
                            &spec.pattern,
                            &message,
                            &self.config,
                        )));
                    }
                }
            }
        }

        if let Some(spec) = FormatSpec::extract(&field.instruction, FormatKind::Number) {
            inline = Some(if text.is_empty() {
                diagnostic_run(EMPTY_VALUE.to_string())
            } else {
                match format_number_value(text, &spec.pattern, &self.config) {
                    FormatAttempt::Formatted(formatted) => {
                        Inline::Run(TextRun::styled(formatted, &field.format))
                    }
                    failed => {
                        tracing::debug!(field = %field.name, value = text, pattern = %spec.pattern, ?failed, "number failed");
                        diagnostic_run(diagnostic::number_error(&spec.pattern))
                    }
                }
            });
        }

        if is_blank(value) && EmptyValuePolicy::for_field(&field.name) == EmptyValuePolicy::BlankRun {
            inline = Some(Inline::Run(TextRun::styled("", &field.format)));
        }

        if wants_page_break(&field.name, value) {
            inline = Some(Inline::PageBreak);
        }

        tracing::trace!(
            field = %field.name,
            value = value.kind(),
            inline = inline.as_ref().map_or("nothing", inline_kind),
            "merged field"
        );
        inline
    }
}

fn diagnostic_run(text: String) -> Inline {
    Inline::Run(TextRun::plain(text))
}

fn inline_kind(inline: &Inline) -> &'static str {
    match inline {
        Inline::Run(_) => "run",
        Inline::Picture(_) => "picture",
        Inline::PageBreak => "page break",
    }
}
