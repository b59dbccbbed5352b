use std::sync::Arc;

use thiserror::Error;

use super::tree::{LexTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no lexical tree configured for substitution")]
    MissingLexTree,
}

/// What to try on a popped backtracking candidate, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Prefix,
    Suffix,
    Result,
}

impl Attempt {
    const ROOT: [Attempt; 3] = [Attempt::Prefix, Attempt::Suffix, Attempt::Result];
    const PREFIX: [Attempt; 2] = [Attempt::Suffix, Attempt::Result];
    const SUFFIX: [Attempt; 1] = [Attempt::Result];
}

/// Rewrites text through a shared [`LexTree`].
#[derive(Debug, Clone, Default)]
pub struct TextReplacer {
    lex_tree: Option<Arc<LexTree>>,
}

impl TextReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lex_tree(mut self, lex_tree: Arc<LexTree>) -> Self {
        self.lex_tree = Some(lex_tree);
        self
    }

    pub fn lex_tree(&self) -> Option<&LexTree> {
        self.lex_tree.as_deref()
    }

    pub fn replace(&self, text: &str) -> Result<String, ConfigurationError> {
        substitute(text, self.lex_tree())
    }
}

/// Replaces every rule match in `text`, scanning left to right.
///
/// Fails only when no tree is supplied. Text without any configured root
/// comes back unchanged.
pub fn substitute(text: &str, lex_tree: Option<&LexTree>) -> Result<String, ConfigurationError> {
    let lex_tree = lex_tree.ok_or(ConfigurationError::MissingLexTree)?;
    if text.is_empty() {
        return Ok(String::new());
    }
    Ok(MatchSession::new(lex_tree, text).run())
}

/// A successful root match: the last input position of the root span and
/// the replacement to emit for it.
struct RootMatch<'t> {
    end: usize,
    replacement: &'t str,
}

/// State of one pass over one input string.
struct MatchSession<'t> {
    tree: &'t LexTree,
    input: Vec<char>,
    anchor: usize,
    out: String,
}

impl<'t> MatchSession<'t> {
    fn new(tree: &'t LexTree, text: &str) -> Self {
        Self {
            tree,
            input: text.chars().collect(),
            anchor: 0,
            out: String::with_capacity(text.len()),
        }
    }

    fn run(mut self) -> String {
        let mut replaced = 0usize;
        while self.anchor < self.input.len() {
            match self.match_root() {
                Some(RootMatch { end, replacement }) => {
                    log::trace!(
                        "replacing {:?} at {} with {replacement:?}",
                        self.input[self.anchor..=end].iter().collect::<String>(),
                        self.anchor
                    );
                    self.out.push_str(replacement);
                    self.anchor = end + 1;
                    replaced += 1;
                }
                None => {
                    self.out.push(self.input[self.anchor]);
                    self.anchor += 1;
                }
            }
        }
        log::debug!("substituted {replaced} spans in {} chars", self.input.len());
        self.out
    }

    /// Longest root match at the anchor, backtracking to shallower
    /// candidates when the deeper ones' context checks all fail.
    fn match_root(&self) -> Option<RootMatch<'t>> {
        let mut candidates = Vec::new();
        let mut node = LexTree::ROOT;
        for (pos, &c) in self.input.iter().enumerate().skip(self.anchor) {
            let Some(next) = self.tree.node(node).child(c) else {
                break;
            };
            node = next;
            if self.tree.node(node).is_candidate() {
                candidates.push((pos, node));
            }
        }

        while let Some((end, id)) = candidates.pop() {
            if let Some(replacement) = self.resolve(id, end, &Attempt::ROOT) {
                return Some(RootMatch { end, replacement });
            }
        }
        None
    }

    /// Walks a prefix sub-trie backwards from the character before the anchor.
    fn match_prefix(&self, start: NodeId, root_end: usize) -> Option<&'t str> {
        let mut candidates = Vec::new();
        let mut node = start;
        for &c in self.input[..self.anchor].iter().rev() {
            let Some(next) = self.tree.node(node).child(c) else {
                break;
            };
            node = next;
            let n = self.tree.node(node);
            if n.result().is_some() || n.suffix().is_some() {
                candidates.push(node);
            }
        }

        while let Some(id) = candidates.pop() {
            if let Some(replacement) = self.resolve(id, root_end, &Attempt::PREFIX) {
                return Some(replacement);
            }
        }
        None
    }

    /// Walks a suffix sub-trie forwards from the character after the root span.
    fn match_suffix(&self, start: NodeId, root_end: usize) -> Option<&'t str> {
        let mut candidates = Vec::new();
        let mut node = start;
        for &c in self.input.iter().skip(root_end + 1) {
            let Some(next) = self.tree.node(node).child(c) else {
                break;
            };
            node = next;
            if self.tree.node(node).result().is_some() {
                candidates.push(node);
            }
        }

        while let Some(id) = candidates.pop() {
            if let Some(replacement) = self.resolve(id, root_end, &Attempt::SUFFIX) {
                return Some(replacement);
            }
        }
        None
    }

    /// Tries the given attempts on one candidate; the first success wins.
    fn resolve(&self, id: NodeId, root_end: usize, attempts: &[Attempt]) -> Option<&'t str> {
        let tree: &'t LexTree = self.tree;
        let node = tree.node(id);
        attempts.iter().find_map(|attempt| match attempt {
            Attempt::Prefix => node
                .prefix()
                .and_then(|prefix| self.match_prefix(prefix, root_end)),
            Attempt::Suffix => node
                .suffix()
                .and_then(|suffix| self.match_suffix(suffix, root_end)),
            Attempt::Result => node.result(),
        })
    }
}
