//! # Document Structure
//!
//! Splits decensored text into classified paragraphs and builds the heading
//! index.
//!
//! ## Pipeline
//!
//! ```text
//! &str → ParagraphClassifier → Unit stream → IndexBuilder → ParsedDoc
//! ```
//!
//! Every byte of the input is accounted for: each paragraph records the
//! boundary runs on either side of it, and whatever boundary run is left at
//! the end of the text is kept as [`ParsedDoc::tail`].

pub mod builder;
pub mod classify;
pub mod index;
pub mod snapshot;
pub mod span;
pub mod types;

pub use builder::IndexBuilder;
pub use classify::ParagraphClassifier;
pub use index::{IndexId, IndexNode, IndexTree};
pub use span::Span;
pub use types::{Paragraph, ParagraphKind, Unit};

#[derive(Debug, Clone)]
pub struct ParsedDoc {
    pub paragraphs: Vec<Paragraph>,
    pub index: IndexTree,
    /// Section keywords in order of first appearance; position is level.
    pub keywords: Vec<char>,
    /// Boundary characters after the last paragraph.
    pub tail: Span,
}

impl ParsedDoc {
    /// The document title without its book-title brackets.
    pub fn title(&self) -> Option<&str> {
        self.paragraphs
            .iter()
            .find(|p| p.kind == ParagraphKind::Title)
            .map(Paragraph::display_text)
    }

    /// Paragraphs recorded directly under `id`, its heading first.
    pub fn section_paragraphs(&self, id: IndexId) -> impl Iterator<Item = &Paragraph> + '_ {
        self.paragraphs
            .iter()
            .skip(self.index.get(id).anchor.unwrap_or(0))
            .filter(move |p| p.section == Some(id))
    }

    /// The heading paragraph an index node points at.
    pub fn heading(&self, id: IndexId) -> Option<&Paragraph> {
        self.index
            .get(id)
            .anchor
            .and_then(|anchor| self.paragraphs.get(anchor))
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

pub fn parse_document(text: &str) -> ParsedDoc {
    let mut classifier = ParagraphClassifier::new(text);
    let mut builder = IndexBuilder::new();

    for unit in classifier.by_ref() {
        builder.push(&unit);
    }

    let tail = classifier.remaining();
    let keywords = builder.keyword_order().to_vec();
    let (paragraphs, index) = builder.finish();
    log::debug!(
        "parsed {} paragraphs, {} index nodes, keywords {:?}",
        paragraphs.len(),
        index.len(),
        keywords
    );

    ParsedDoc {
        paragraphs,
        index,
        keywords,
        tail,
    }
}

#[cfg(test)]
mod tests;
