/// A run of inline text with its bold flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Block-level elements recognised in Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        /// Always within 1..=9
        level: u8,
        text: String,
    },
    Rule,
    BulletItem {
        content: Vec<Segment>,
    },
    NumberedItem {
        content: Vec<Segment>,
    },
    /// Quotes keep their raw text; `**` is not interpreted.
    Quote {
        text: String,
    },
    CodeBlock {
        lines: Vec<String>,
    },
    Paragraph {
        content: Vec<Segment>,
    },
}

impl Block {
    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Rule => "rule",
            Block::BulletItem { .. } => "bullet item",
            Block::NumberedItem { .. } => "numbered item",
            Block::Quote { .. } => "quote",
            Block::CodeBlock { .. } => "code block",
            Block::Paragraph { .. } => "paragraph",
        }
    }
}
