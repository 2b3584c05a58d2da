//! The authoring surface the converter writes against.
//!
//! [`Document`] is deliberately small: set the body font, add paragraphs with a named style,
//! add runs to them, save. The DOCX backend implements it in [`crate::docx`].

use std::path::Path;

use crate::error::ConvertError;

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Named paragraph styles understood by every backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    /// Level within 1..=9
    Heading(u8),
    ListBullet,
    ListNumber,
    Quote,
    NoSpacing,
}

impl ParagraphStyle {
    /// Display name, as shown in a word processor's style list.
    pub fn name(self) -> String {
        match self {
            ParagraphStyle::Normal => "Normal".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading {level}"),
            ParagraphStyle::ListBullet => "List Bullet".to_string(),
            ParagraphStyle::ListNumber => "List Number".to_string(),
            ParagraphStyle::Quote => "Quote".to_string(),
            ParagraphStyle::NoSpacing => "No Spacing".to_string(),
        }
    }

    /// Identifier used to reference the style from document content.
    pub fn id(self) -> String {
        self.name().replace(' ', "")
    }
}

/// A contiguous run of text sharing one character format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Overrides the style's font when set
    pub font: Option<String>,
    /// Point size; overrides the style's size when set
    pub size: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub alignment: Alignment,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn add_run(&mut self, text: impl Into<String>) -> &mut Run {
        self.runs.push(Run {
            text: text.into(),
            ..Run::default()
        });
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

pub trait Document {
    /// Font family and point size of the `Normal` style.
    fn set_default_font(&mut self, name: &str, size: f32);

    fn add_paragraph(&mut self, style: ParagraphStyle) -> &mut Paragraph;

    fn save(&self, path: &Path) -> Result<(), ConvertError>;

    fn add_heading(&mut self, text: &str, level: u8) {
        self.add_paragraph(ParagraphStyle::Heading(level))
            .add_run(text);
    }
}
