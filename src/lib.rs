mod block;
mod config;
mod document;
mod docx;
mod error;
mod inline;
mod parser;
mod render;

pub use block::{Block, Segment};
pub use config::{CodeConfig, Config, FontConfig, RuleConfig};
pub use document::{Alignment, Document, Paragraph, ParagraphStyle, Run};
pub use docx::DocxDocument;
pub use error::ConvertError;
pub use inline::split_bold;
pub use parser::{BlockParser, LineKind, classify};

use std::fs;
use std::path::Path;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown into any [`Document`], emitting each block as soon as it is recognised.
/// Returns the number of blocks written.
pub fn convert<D: Document + ?Sized>(markdown: &str, doc: &mut D, config: &Config) -> usize {
    doc.set_default_font(&config.font.name, config.font.size);

    let mut block_parser = BlockParser::new();
    let mut count = 0;
    for line in parser::lines(markdown) {
        if let Some(block) = block_parser.push_line(line) {
            log::debug!("Emitting {}", block.kind());
            render::emit_block(&block, doc, config);
            count += 1;
        }
    }
    block_parser.finish();
    count
}

/// Convert markdown to an in-memory DOCX document.
pub fn markdown_to_docx(markdown: &str, config: &Config) -> DocxDocument {
    let mut doc = DocxDocument::new();
    convert(markdown, &mut doc, config);
    doc
}

/// Read a markdown file and save it as a DOCX document. Returns the number of blocks written.
pub fn convert_file(input: &Path, output: &Path, config: &Config) -> Result<usize, ConvertError> {
    let markdown = fs::read_to_string(input).map_err(|source| ConvertError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Read {} lines from {}",
        markdown.lines().count(),
        input.display()
    );

    let mut doc = DocxDocument::new();
    let count = convert(&markdown, &mut doc, config);
    doc.save(output)?;

    log::info!(
        "Converted {} blocks from {} to {}",
        count,
        input.display(),
        output.display()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_mixed_document() {
        let md = "\
# Deploy Guide

Install the **server** first.

- **Step 1**: do the thing
1. numbered
> quoted **text**
---
```
cargo build
```
";
        let doc = markdown_to_docx(md, &Config::default());
        let styles: Vec<_> = doc.paragraphs().iter().map(|p| p.style).collect();
        assert_eq!(
            styles,
            vec![
                ParagraphStyle::Heading(1),
                ParagraphStyle::Normal,
                ParagraphStyle::ListBullet,
                ParagraphStyle::ListNumber,
                ParagraphStyle::Quote,
                ParagraphStyle::Normal,
                ParagraphStyle::NoSpacing,
            ]
        );
        assert_eq!(doc.paragraphs()[1].text(), "Install the server first.");
        assert_eq!(doc.paragraphs()[5].alignment, Alignment::Center);
        assert_eq!(doc.paragraphs()[6].text(), "cargo build");
    }

    #[test]
    fn default_font_comes_from_config() {
        let mut config = Config::default();
        config.font.name = "Georgia".to_string();
        config.font.size = 12.5;
        let doc = markdown_to_docx("text", &config);
        assert_eq!(doc.default_font(), ("Georgia", 12.5));
    }

    #[test]
    fn blank_input_has_no_paragraphs() {
        let mut doc = DocxDocument::new();
        assert_eq!(convert("\n\n  \n", &mut doc, &Config::default()), 0);
        assert!(doc.paragraphs().is_empty());
    }

    #[test]
    fn convert_file_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            &dir.path().join("absent.md"),
            &dir.path().join("out.docx"),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::ReadInput { .. }));
        assert!(!dir.path().join("out.docx").exists());
    }

    #[test]
    fn convert_file_rejects_control_characters() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("out.docx");
        fs::write(&input, "ok\n\nbell\u{7} and nul\u{0} text\n").unwrap();

        let err = convert_file(&input, &output, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidText {
                paragraph: 2,
                code: 7
            }
        ));
        assert!(!output.exists());
    }

    #[test]
    fn convert_file_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("out.docx");
        fs::write(&input, "## Title\n\nBody\n").unwrap();

        assert_eq!(convert_file(&input, &output, &Config::default()).unwrap(), 2);
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }
}
