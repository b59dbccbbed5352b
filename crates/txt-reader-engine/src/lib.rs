pub mod cleaning;
pub mod io;
pub mod lexicon;
pub mod models;
pub mod parsing;
pub mod processor;

// Re-export key types for easier usage
pub use cleaning::clean_text;
pub use io::*;
pub use lexicon::{
    ConfigurationError, LexTree, RuleSyntaxError, TextReplacer, build_lex_tree, default_rules,
    substitute,
};
pub use models::NovelFile;
pub use parsing::{IndexId, IndexTree, Paragraph, ParagraphKind, ParsedDoc, parse_document};
pub use processor::{NovelProcessor, ProcessedNovel};
