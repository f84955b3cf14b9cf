//! Text normalization and answer matching for typed answers.

use serde::{Deserialize, Serialize};

const GERMAN_ARTICLES: [&str; 3] = ["der ", "die ", "das "];

/// How typed answers are canonicalized before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Normalize only.
    Exact,
    /// Normalize and drop a leading German definite article on both sides.
    ArticleInsensitive,
}

/// Result of comparing a typed answer to the accepted answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Canonical typed answer.
    pub typed_normalized: String,
    /// The accepted answer that matched, if any.
    pub matched: Option<String>,
}

/// Lower-case, unify the typographic apostrophe and trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'").trim().to_string()
}

/// Normalize and strip one leading `der`/`die`/`das`.
pub fn strip_german_article(text: &str) -> String {
    let normalized = normalize(text);
    for article in GERMAN_ARTICLES {
        if let Some(rest) = normalized.strip_prefix(article) {
            return rest.to_string();
        }
    }
    normalized
}

fn canonical(text: &str, strategy: MatchStrategy) -> String {
    match strategy {
        MatchStrategy::Exact => normalize(text),
        MatchStrategy::ArticleInsensitive => strip_german_article(text),
    }
}

/// Compare a typed answer against every accepted answer.
pub fn compare_answers<S: AsRef<str>>(
    typed: &str,
    accepted: &[S],
    strategy: MatchStrategy,
) -> MatchResult {
    let typed_normalized = canonical(typed, strategy);
    let matched = accepted
        .iter()
        .map(|candidate| candidate.as_ref())
        .find(|candidate| canonical(candidate, strategy) == typed_normalized)
        .map(str::to_string);

    MatchResult {
        is_correct: matched.is_some(),
        typed_normalized,
        matched,
    }
}
