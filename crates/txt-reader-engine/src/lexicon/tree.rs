use std::collections::HashMap;

use super::rule::{Rule, RuleSyntaxError};

/// Index of a node in a [`LexTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single trie node.
///
/// Child edges are keyed by character. The three optional links are what
/// make a node a stop point for backtracking:
/// - `result`: the replacement for a complete match ending here
/// - `prefix`: root of a sub-trie matched backwards before the root span
/// - `suffix`: root of a sub-trie matched forwards after the root span
#[derive(Debug, Clone, Default)]
pub struct LexNode {
    children: HashMap<char, NodeId>,
    result: Option<String>,
    prefix: Option<NodeId>,
    suffix: Option<NodeId>,
}

impl LexNode {
    pub fn child(&self, c: char) -> Option<NodeId> {
        self.children.get(&c).copied()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn prefix(&self) -> Option<NodeId> {
        self.prefix
    }

    pub fn suffix(&self) -> Option<NodeId> {
        self.suffix
    }

    /// Whether backtracking may stop here. Pass-through nodes never are.
    pub fn is_candidate(&self) -> bool {
        self.result.is_some() || self.prefix.is_some() || self.suffix.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum Branch {
    Prefix,
    Suffix,
}

/// Trie of substitution rules stored in an arena.
///
/// Immutable once built; share it between replacers with an `Arc`.
#[derive(Debug, Clone)]
pub struct LexTree {
    nodes: Vec<LexNode>,
    rules: usize,
}

impl LexTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![LexNode::default()],
            rules: 0,
        }
    }

    /// Compiles an ordered rule set, failing on the first malformed rule.
    pub fn from_rules<I, S>(rules: I) -> Result<Self, RuleSyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        let mut skipped = 0;
        for (i, rule) in rules.into_iter().enumerate() {
            if !tree.add_rule(rule.as_ref()).map_err(|e| e.at(i + 1))? {
                skipped += 1;
            }
        }
        log::debug!(
            "compiled {} rules into {} nodes ({skipped} skipped)",
            tree.rules,
            tree.nodes.len()
        );
        Ok(tree)
    }

    /// Builds a tree from [`super::default_rules`].
    pub fn with_default_rules() -> Result<Self, RuleSyntaxError> {
        Self::from_rules(super::default_rules())
    }

    /// Parses and inserts one rule string.
    ///
    /// Returns `Ok(false)` when the rule has an empty root and was skipped.
    pub fn add_rule(&mut self, rule: &str) -> Result<bool, RuleSyntaxError> {
        match Rule::parse(rule)? {
            Some(rule) => {
                self.insert(&rule);
                Ok(true)
            }
            None => {
                log::debug!("skipping rule with empty root: {rule:?}");
                Ok(false)
            }
        }
    }

    /// Inserts a parsed rule.
    ///
    /// Root characters go in forwards from the tree root, prefix characters
    /// backwards (nearest to the root first) under a `prefix` link, suffix
    /// characters forwards under a `suffix` link hung off the last node
    /// reached. The replacement lands on the final node.
    pub fn insert(&mut self, rule: &Rule) {
        let mut node = Self::ROOT;
        for c in rule.root.chars() {
            node = self.child_or_insert(node, c);
        }
        if !rule.prefix.is_empty() {
            node = self.branch_or_insert(node, Branch::Prefix);
            for c in rule.prefix.chars().rev() {
                node = self.child_or_insert(node, c);
            }
        }
        if !rule.suffix.is_empty() {
            node = self.branch_or_insert(node, Branch::Suffix);
            for c in rule.suffix.chars() {
                node = self.child_or_insert(node, c);
            }
        }
        self.nodes[node.0].result = Some(rule.replacement.clone());
        self.rules += 1;
    }

    pub fn node(&self, id: NodeId) -> &LexNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, root and sub-trie roots included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules == 0
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(LexNode::default());
        NodeId(self.nodes.len() - 1)
    }

    fn child_or_insert(&mut self, from: NodeId, c: char) -> NodeId {
        if let Some(id) = self.nodes[from.0].child(c) {
            return id;
        }
        let id = self.push_node();
        self.nodes[from.0].children.insert(c, id);
        id
    }

    fn branch_or_insert(&mut self, from: NodeId, branch: Branch) -> NodeId {
        let existing = match branch {
            Branch::Prefix => self.nodes[from.0].prefix,
            Branch::Suffix => self.nodes[from.0].suffix,
        };
        if let Some(id) = existing {
            return id;
        }
        let id = self.push_node();
        match branch {
            Branch::Prefix => self.nodes[from.0].prefix = Some(id),
            Branch::Suffix => self.nodes[from.0].suffix = Some(id),
        }
        id
    }
}

impl Default for LexTree {
    fn default() -> Self {
        Self::new()
    }
}
