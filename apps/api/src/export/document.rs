//! Splits drafted contract text into headings and paragraphs.

pub const DOCUMENT_TITLE: &str = "Non-Disclosure Agreement";

const HEADING_KEYWORDS: [&str; 2] = ["article", "section"];

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Document title (Word "Title" style).
    Title(String),
    /// Clause heading (Word "Heading 2" style), already trimmed.
    Heading(String),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A line is a heading if, once trimmed, it starts with "article"/"section"
/// (any case) or ends with a colon.
pub fn is_heading(line: &str) -> bool {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();
    HEADING_KEYWORDS.iter().any(|k| lower.starts_with(k)) || trimmed.ends_with(':')
}

/// Builds the document: the fixed title, then one block per non-blank line.
/// Paragraph lines keep their original text; headings are trimmed.
pub fn parse_document(text: &str) -> Document {
    let mut blocks = vec![Block::Title(DOCUMENT_TITLE.to_string())];

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_heading(line) {
            blocks.push(Block::Heading(trimmed.to_string()));
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    Document { blocks }
}
