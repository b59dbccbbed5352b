use std::sync::Arc;

use crate::{
    cleaning::clean_text,
    lexicon::{ConfigurationError, LexTree, TextReplacer},
    parsing::{ParsedDoc, parse_document},
};

/// A processed novel: the decensored text and its structure.
///
/// Spans in `doc` index into `text`.
#[derive(Debug, Clone)]
pub struct ProcessedNovel {
    pub text: String,
    pub doc: ParsedDoc,
}

impl ProcessedNovel {
    /// Text of paragraph `i` as it appears in the source, boundaries
    /// excluded.
    pub fn paragraph_text(&self, i: usize) -> Option<&str> {
        self.doc.paragraphs.get(i).map(|p| p.span.slice(&self.text))
    }
}

/// Runs the whole pipeline: clean, substitute, parse.
#[derive(Debug, Clone)]
pub struct NovelProcessor {
    replacer: TextReplacer,
    clean: bool,
}

impl NovelProcessor {
    pub fn new() -> Self {
        Self {
            replacer: TextReplacer::new(),
            clean: true,
        }
    }

    pub fn with_lex_tree(mut self, lex_tree: Arc<LexTree>) -> Self {
        self.replacer = self.replacer.with_lex_tree(lex_tree);
        self
    }

    /// Toggles control-character and tag stripping (on by default).
    pub fn with_cleaning(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Cleans (if enabled) and substitutes `raw`.
    pub fn decensor(&self, raw: &str) -> Result<String, ConfigurationError> {
        if self.clean {
            self.replacer.replace(&clean_text(raw))
        } else {
            self.replacer.replace(raw)
        }
    }

    pub fn process(&self, raw: &str) -> Result<ProcessedNovel, ConfigurationError> {
        let text = self.decensor(raw)?;
        let doc = parse_document(&text);
        Ok(ProcessedNovel { text, doc })
    }
}

impl Default for NovelProcessor {
    fn default() -> Self {
        Self::new()
    }
}
