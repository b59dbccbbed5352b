use std::fmt;

use thiserror::Error;

/// Separator between the pattern and the replacement of a rule.
pub const SEPARATOR: &str = "=>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSyntaxError {
    #[error("rule {rule:?} has no `=>` separator")]
    MissingSeparator { rule: String },
    #[error("rule {number}: {source}")]
    AtRule {
        /// 1-based position in the rule list.
        number: usize,
        #[source]
        source: Box<RuleSyntaxError>,
    },
}

impl RuleSyntaxError {
    /// Tags the error with the 1-based position of the offending rule.
    pub fn at(self, number: usize) -> Self {
        Self::AtRule {
            number,
            source: Box::new(self),
        }
    }
}

/// A compiled substitution rule: `prefix(root)suffix => replacement`.
///
/// `prefix` and `suffix` are context that must surround the root for the
/// rule to apply. Only the root is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub prefix: String,
    pub root: String,
    pub suffix: String,
    pub replacement: String,
}

impl Rule {
    /// Parses a rule string.
    ///
    /// Returns `Ok(None)` for rules whose root is empty (`"() => x"`, `"=> x"`);
    /// these are template entries and are skipped rather than rejected.
    pub fn parse(text: &str) -> Result<Option<Self>, RuleSyntaxError> {
        let (lhs, rhs) =
            text.split_once(SEPARATOR)
                .ok_or_else(|| RuleSyntaxError::MissingSeparator {
                    rule: text.to_string(),
                })?;
        let lhs = lhs.trim();

        let (prefix, root, suffix) = match (lhs.find('('), lhs.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                (&lhs[..open], &lhs[open + 1..close], &lhs[close + 1..])
            }
            _ => ("", lhs, ""),
        };

        if root.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            prefix: prefix.to_string(),
            root: root.to_string(),
            suffix: suffix.to_string(),
            replacement: rhs.trim().to_string(),
        }))
    }

    pub fn has_context(&self) -> bool {
        !self.prefix.is_empty() || !self.suffix.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_context() {
            write!(
                f,
                "{}({}){} {SEPARATOR} {}",
                self.prefix, self.root, self.suffix, self.replacement
            )
        } else {
            write!(f, "{} {SEPARATOR} {}", self.root, self.replacement)
        }
    }
}
