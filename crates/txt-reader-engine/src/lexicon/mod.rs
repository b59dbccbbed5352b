//! # Lexical Substitution
//!
//! Repairs obfuscated vocabulary (pinyin stand-ins, masked characters) by
//! rewriting text through a trie of substitution rules.
//!
//! ## Rule notation
//!
//! `prefix(root)suffix => replacement`, or `root => replacement`. Only the
//! root is replaced; prefix and suffix are context that must surround it.
//!
//! ## Modules
//!
//! - **`rule`**: parses rule strings into [`Rule`]s
//! - **`tree`**: [`LexTree`], the arena-backed trie rules compile into
//! - **`replacer`**: longest-match-with-backtracking rewriting over a tree
//! - **`defaults`**: the built-in rule set
//!
//! ## Matching
//!
//! At every position the deepest root match is tried first. A candidate
//! node is accepted through its prefix branch, then its suffix branch, then
//! its own result; when all fail the next shallower candidate is tried. A
//! position with no accepted candidate is copied through unchanged.

pub mod defaults;
pub mod replacer;
pub mod rule;
pub mod tree;

pub use defaults::default_rules;
pub use replacer::{ConfigurationError, TextReplacer, substitute};
pub use rule::{Rule, RuleSyntaxError};
pub use tree::{LexNode, LexTree, NodeId};

/// Compiles rule strings into a [`LexTree`].
///
/// Fails on the first rule without a `=>` separator. Rules with an empty
/// root are skipped.
pub fn build_lex_tree<I, S>(rules: I) -> Result<LexTree, RuleSyntaxError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LexTree::from_rules(rules)
}
