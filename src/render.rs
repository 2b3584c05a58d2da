use crate::block::{Block, Segment};
use crate::config::Config;
use crate::document::{Alignment, Document, Paragraph, ParagraphStyle};

/// Write one block into the document.
pub fn emit_block<D: Document + ?Sized>(block: &Block, doc: &mut D, config: &Config) {
    match block {
        Block::Heading { level, text } => {
            doc.add_heading(text, *level);
        }
        Block::Rule => {
            let p = doc.add_paragraph(ParagraphStyle::Normal);
            p.add_run("_".repeat(config.rule.width));
            p.alignment = Alignment::Center;
        }
        Block::BulletItem { content } => {
            segments_to_runs(content, doc.add_paragraph(ParagraphStyle::ListBullet));
        }
        Block::NumberedItem { content } => {
            segments_to_runs(content, doc.add_paragraph(ParagraphStyle::ListNumber));
        }
        Block::Quote { text } => {
            doc.add_paragraph(ParagraphStyle::Quote).add_run(text.as_str());
        }
        Block::CodeBlock { lines } => {
            let run = doc
                .add_paragraph(ParagraphStyle::NoSpacing)
                .add_run(lines.join("\n"));
            run.font = Some(config.code.font.clone());
            run.size = Some(config.code.size);
        }
        Block::Paragraph { content } => {
            segments_to_runs(content, doc.add_paragraph(ParagraphStyle::Normal));
        }
    }
}

fn segments_to_runs(segments: &[Segment], paragraph: &mut Paragraph) {
    for segment in segments {
        paragraph.add_run(segment.text.as_str()).bold = segment.bold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::DocxDocument;

    fn render(block: Block) -> Paragraph {
        let mut doc = DocxDocument::new();
        emit_block(&block, &mut doc, &Config::default());
        assert_eq!(doc.paragraphs().len(), 1);
        doc.paragraphs()[0].clone()
    }

    #[test]
    fn heading_uses_heading_style() {
        let p = render(Block::Heading {
            level: 3,
            text: "Overview".to_string(),
        });
        assert_eq!(p.style, ParagraphStyle::Heading(3));
        assert_eq!(p.text(), "Overview");
    }

    #[test]
    fn rule_is_centered_underscores() {
        let p = render(Block::Rule);
        assert_eq!(p.alignment, Alignment::Center);
        assert_eq!(p.text(), "_".repeat(30));
    }

    #[test]
    fn bullet_runs_keep_bold_flags() {
        let p = render(Block::BulletItem {
            content: vec![Segment::bold("Step 1"), Segment::plain(": do the thing")],
        });
        assert_eq!(p.style, ParagraphStyle::ListBullet);
        let runs: Vec<_> = p.runs.iter().map(|r| (r.text.as_str(), r.bold)).collect();
        assert_eq!(runs, vec![("Step 1", true), (": do the thing", false)]);
    }

    #[test]
    fn numbered_item_style() {
        let p = render(Block::NumberedItem {
            content: vec![Segment::plain("first")],
        });
        assert_eq!(p.style, ParagraphStyle::ListNumber);
    }

    #[test]
    fn quote_is_single_plain_run() {
        let p = render(Block::Quote {
            text: "keep **stars**".to_string(),
        });
        assert_eq!(p.style, ParagraphStyle::Quote);
        assert_eq!(p.runs.len(), 1);
        assert_eq!(p.text(), "keep **stars**");
        assert!(!p.runs[0].bold);
    }

    #[test]
    fn code_block_uses_code_font() {
        let p = render(Block::CodeBlock {
            lines: vec!["let a = 1;".to_string(), "let b = 2;".to_string()],
        });
        assert_eq!(p.style, ParagraphStyle::NoSpacing);
        assert_eq!(p.runs.len(), 1);
        assert_eq!(p.runs[0].text, "let a = 1;\nlet b = 2;");
        assert_eq!(p.runs[0].font.as_deref(), Some("Courier New"));
        assert_eq!(p.runs[0].size, Some(9.0));
    }
}
