/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Inline content produced for a merge field.

use crate::picture::Picture;

/// Character styling of a merge field, carried over to formatted runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterFormat {
    pub font_name: Option<String>,
    /// Font size in points.
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// RGB color as `RRGGBB`.
    pub color: Option<String>,
}

/// A run of text, with the field's styling when the text is a value rather
/// than a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub format: Option<CharacterFormat>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: None,
        }
    }

    pub fn styled(text: impl Into<String>, format: &CharacterFormat) -> Self {
        Self {
            text: text.into(),
            format: Some(format.clone()),
        }
    }
}

/// What a merge field is replaced with.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Run(TextRun),
    Picture(Picture),
    PageBreak,
}

impl Inline {
    /// The run text, if this is a run.
    pub fn text(&self) -> Option<&str> {
        match self {
            Inline::Run(run) => Some(&run.text),
            _ => None,
        }
    }
}

/// A merge field as the merge driver sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeField {
    /// The field name, including parameters and modifiers
    /// (`Logo(w:200,h:100)$omitIfEmpty`).
    pub name: String,

    /// The full instruction text (`MERGEFIELD Date \@ "yyyy"`).
    pub instruction: String,

    pub format: CharacterFormat,
}

impl MergeField {
    /// A field whose instruction is just `MERGEFIELD <name>`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            instruction: format!("MERGEFIELD {}", name),
            name,
            format: CharacterFormat::default(),
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_format(mut self, format: CharacterFormat) -> Self {
        self.format = format;
        self
    }
}
