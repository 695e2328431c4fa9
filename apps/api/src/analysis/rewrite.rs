//! Deterministic phrase substitution used for every `improvedContent` text.
//!
//! Rules run in table order and each one sees the output of the previous
//! one, so a later rule can re-match text an earlier rule produced. The
//! pass is not idempotent: running it twice re-expands tech nouns.

use regex::{NoExpand, Regex};

/// One case-insensitive, whole-phrase substitution.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    pub fn new(phrase: &str, replacement: &'static str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))?;
        Ok(Self {
            pattern,
            replacement,
        })
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(self.replacement))
            .into_owned()
    }
}

/// Applies `rules` in order, replacing every occurrence of each phrase.
pub fn rewrite_text<'a, I>(text: &str, rules: I) -> String
where
    I: IntoIterator<Item = &'a RewriteRule>,
{
    rules
        .into_iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}
