use serde::Serialize;

use super::{index::IndexId, span::Span};

/// Book-title brackets wrapping a title unit.
pub const TITLE_OPEN: char = '《';
pub const TITLE_CLOSE: char = '》';

/// The kind of a classified unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParagraphKind {
    /// `《…》` before anything else in the document.
    Title,
    /// Front matter: 序, 前言, 楔子, …
    PrefaceHeading,
    /// Numbered section: 第一章, 第3卷, 十二回, …
    SectionHeading,
    /// Back matter: 后记, 附言, 结语.
    PostscriptHeading,
    /// Everything else.
    Paragraph,
}

impl ParagraphKind {
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            Self::PrefaceHeading | Self::SectionHeading | Self::PostscriptHeading
        )
    }
}

/// One unit produced by the classifier, borrowing from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    pub kind: ParagraphKind,
    pub text: &'a str,
    /// Structural keyword, section headings only.
    pub keyword: Option<char>,
    /// Span of `text`.
    pub span: Span,
    /// Boundary characters consumed before `text`.
    pub leading: Span,
    /// Boundary characters consumed after `text` (up to one line break).
    pub trailing: Span,
}

/// An owned paragraph record in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub text: String,
    pub keyword: Option<char>,
    pub span: Span,
    pub leading: Span,
    pub trailing: Span,
    /// Heading level: the index node level for headings, `None` otherwise.
    pub level: Option<usize>,
    /// Index node this paragraph belongs to; a heading's own node.
    /// `None` before the first heading.
    pub section: Option<IndexId>,
}

impl Paragraph {
    /// Text to display: the title without its brackets, otherwise `text`.
    pub fn display_text(&self) -> &str {
        match self.kind {
            ParagraphKind::Title => self
                .text
                .strip_prefix(TITLE_OPEN)
                .and_then(|t| t.strip_suffix(TITLE_CLOSE))
                .unwrap_or(&self.text),
            _ => &self.text,
        }
    }
}
