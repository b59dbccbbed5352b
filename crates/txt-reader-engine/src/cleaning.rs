//! Removes control characters and markup tags left behind by scraped text.

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Longest tag body removed, in characters between the opener and `>`.
pub const MAX_TAG_LEN: usize = 200;

fn noise_regex() -> &'static Regex {
    static NOISE_REGEX: OnceLock<Regex> = OnceLock::new();
    NOISE_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)[\x01-\x09\x1B\x1C\x1E\x1F\x7F]|(?:<|&lt;)[a-z/!%\-][^>]{{0,{MAX_TAG_LEN}}}(?:>|&gt;)"
        ))
        .expect("Invalid noise regex")
    })
}

/// Strips control characters (U+0001–U+0009, including tab) and HTML-like
/// tags, raw or entity-escaped.
///
/// Borrows the input when nothing was removed.
pub fn clean_text(raw: &str) -> Cow<'_, str> {
    let cleaned = noise_regex().replace_all(raw, "");
    if let Cow::Owned(ref s) = cleaned {
        log::debug!("cleaning removed {} bytes", raw.len() - s.len());
    }
    cleaned
}
