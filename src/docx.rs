//! WordprocessingML (`.docx`) backend for [`Document`].
//!
//! Paragraphs are kept in memory and only serialized on save. The package is the minimal
//! set of parts Word and LibreOffice need: content types, relationships, the main document,
//! styles and numbering definitions for the two list styles.

use std::fmt::Write as _;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::document::{Alignment, Document, Paragraph, ParagraphStyle, Run};
use crate::error::ConvertError;

/// Heading sizes in half-points, index 0 is `Heading 1`.
const HEADING_SIZES: [u32; 9] = [32, 28, 26, 24, 22, 22, 22, 22, 22];

#[derive(Debug, Clone)]
pub struct DocxDocument {
    font: String,
    size: f32,
    paragraphs: Vec<Paragraph>,
}

impl Default for DocxDocument {
    fn default() -> Self {
        Self {
            font: "Calibri".to_string(),
            size: 11.0,
            paragraphs: Vec::new(),
        }
    }
}

impl DocxDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn default_font(&self) -> (&str, f32) {
        (&self.font, self.size)
    }

    /// The `word/document.xml` part.
    pub fn document_xml(&self) -> String {
        let mut body = String::new();
        for paragraph in &self.paragraphs {
            write_paragraph(paragraph, &mut body);
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>
{body}    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
        )
    }

    /// The `word/styles.xml` part.
    pub fn styles_xml(&self) -> String {
        let font = xml_escape(&self.font);
        let size = half_points(self.size);

        let mut styles = String::new();
        styles.push_str(
            r#"  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
        );
        for (i, heading_size) in HEADING_SIZES.iter().enumerate() {
            let level = i as u8 + 1;
            let style = ParagraphStyle::Heading(level);
            let _ = write!(
                styles,
                r#"  <w:style w:type="paragraph" w:styleId="{id}">
    <w:name w:val="{name}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:outlineLvl w:val="{outline}"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="{heading_size}"/><w:szCs w:val="{heading_size}"/></w:rPr>
  </w:style>
"#,
                id = style.id(),
                // Word only treats lower-case "heading N" as its built-in heading style.
                name = style.name().to_lowercase(),
                outline = level - 1,
            );
        }
        write_list_style(&mut styles, ParagraphStyle::ListBullet, 1);
        write_list_style(&mut styles, ParagraphStyle::ListNumber, 2);
        styles.push_str(
            r#"  <w:style w:type="paragraph" w:styleId="Quote">
    <w:name w:val="Quote"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:ind w:left="720" w:right="720"/></w:pPr>
    <w:rPr><w:i/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="NoSpacing">
    <w:name w:val="No Spacing"/>
    <w:qFormat/>
    <w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>
  </w:style>
"#,
        );

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
{styles}</w:styles>"#
        )
    }

    /// Serialize the whole package into memory.
    ///
    /// Fails with [`ConvertError::InvalidText`] if any run holds a character XML 1.0 forbids.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConvertError> {
        self.check_text()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opt =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", RELS_XML.to_string()),
            ("word/document.xml", self.document_xml()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/styles.xml", self.styles_xml()),
            ("word/numbering.xml", NUMBERING_XML.to_string()),
        ];
        for (name, content) in parts {
            zip.start_file(name, opt)?;
            zip.write_all(content.as_bytes()).map_err(ZipError::from)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

impl DocxDocument {
    fn check_text(&self) -> Result<(), ConvertError> {
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            let chars = paragraph
                .runs
                .iter()
                .flat_map(|run| run.text.chars().chain(run.font.iter().flat_map(|f| f.chars())));
            for ch in chars {
                if !is_xml_char(ch) {
                    return Err(ConvertError::InvalidText {
                        paragraph: i + 1,
                        code: ch as u32,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Document for DocxDocument {
    fn set_default_font(&mut self, name: &str, size: f32) {
        self.font = name.to_string();
        self.size = size;
    }

    fn add_paragraph(&mut self, style: ParagraphStyle) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(style));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    fn save(&self, path: &Path) -> Result<(), ConvertError> {
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes).map_err(|source| ConvertError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

fn write_list_style(out: &mut String, style: ParagraphStyle, num_id: u32) {
    let _ = write!(
        out,
        r#"  <w:style w:type="paragraph" w:styleId="{id}">
    <w:name w:val="{name}"/>
    <w:basedOn w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{num_id}"/></w:numPr><w:contextualSpacing/></w:pPr>
  </w:style>
"#,
        id = style.id(),
        name = style.name(),
    );
}

fn write_paragraph(paragraph: &Paragraph, out: &mut String) {
    out.push_str("    <w:p>");

    let jc = match paragraph.alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
        Alignment::Justify => Some("both"),
    };
    if paragraph.style != ParagraphStyle::Normal || jc.is_some() {
        out.push_str("<w:pPr>");
        if paragraph.style != ParagraphStyle::Normal {
            let _ = write!(out, r#"<w:pStyle w:val="{}"/>"#, paragraph.style.id());
        }
        if let Some(jc) = jc {
            let _ = write!(out, r#"<w:jc w:val="{jc}"/>"#);
        }
        out.push_str("</w:pPr>");
    }

    for run in &paragraph.runs {
        write_run(run, out);
    }
    out.push_str("</w:p>\n");
}

fn write_run(run: &Run, out: &mut String) {
    out.push_str("<w:r>");

    if run.bold || run.font.is_some() || run.size.is_some() {
        out.push_str("<w:rPr>");
        if let Some(font) = &run.font {
            let font = xml_escape(font);
            let _ = write!(
                out,
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            );
        }
        if run.bold {
            out.push_str("<w:b/>");
        }
        if let Some(size) = run.size {
            let size = half_points(size);
            let _ = write!(out, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#);
        }
        out.push_str("</w:rPr>");
    }

    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                out.push_str("<w:tab/>");
            }
            if !piece.is_empty() {
                let _ = write!(
                    out,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    xml_escape(piece)
                );
            }
        }
    }

    out.push_str("</w:r>");
}

fn half_points(size: f32) -> u32 {
    (size * 2.0).round().max(1.0) as u32
}

/// The `Char` production of XML 1.0.
fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

// numId 1 is the bullet list, numId 2 the decimal list.
const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:lvlText w:val="&#8226;"/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="decimal"/>
      <w:lvlText w:val="%1."/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>
</w:numbering>"#;
