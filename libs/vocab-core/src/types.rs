//! Core types for the vocabulary trainer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::unix_seconds;

/// Scheduling state for one vocabulary item.
///
/// Serialized exactly as it appears in the progress file:
/// `{"interval": 2, "due": 1718000000.5, "ease": 2.4}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Days until the item is due again. Never below 1.
    pub interval: u32,
    /// Unix timestamp in seconds.
    pub due: f64,
    /// Interval multiplier, kept within [1.3, 3.0].
    pub ease: f64,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            interval: 1,
            due: 0.0,
            ease: 2.5,
        }
    }
}

impl Record {
    /// Whether the item may be presented at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= unix_seconds(now)
    }
}

/// Quiz direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Italian source term shown, German answer expected.
    Forward,
    /// German target shown, Italian source term expected.
    Reverse,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Forward
    }
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

/// Exercise mode for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseMode {
    Translation,
    /// Type the plural with its article (noun lectures only).
    Plural,
    /// Type the indefinite article (noun lectures only).
    IndefiniteArticle,
}

impl Default for ExerciseMode {
    fn default() -> Self {
        Self::Translation
    }
}

impl ExerciseMode {
    /// Grammar modes only make sense for article-prefixed noun keys.
    pub fn is_grammar(self) -> bool {
        matches!(self, Self::Plural | Self::IndefiniteArticle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::Plural => "plural",
            Self::IndefiniteArticle => "article",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "translation" => Some(Self::Translation),
            "plural" => Some(Self::Plural),
            "article" => Some(Self::IndefiniteArticle),
            _ => None,
        }
    }
}

/// Which item selection model drives a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Calendar-scheduled review: only due items, uniform choice.
    Due,
    /// Weighted sampling without due dates.
    Weighted,
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        Self::Due
    }
}

impl SelectionStrategy {
    /// Get the strategy name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Due => "due",
            Self::Weighted => "weighted",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "due" => Some(Self::Due),
            "weighted" => Some(Self::Weighted),
            _ => None,
        }
    }
}

/// Trainer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub selection: SelectionStrategy,
    /// Schedule reverse-direction answers in their own progress store.
    pub per_direction_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selection: SelectionStrategy::default(),
            per_direction_progress: false,
        }
    }
}

/// Accepted translation(s) of a source term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Single(String),
    /// All alternatives are equally correct.
    Many(Vec<String>),
}

impl Target {
    /// Every accepted answer, in lecture order.
    pub fn accepted(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Human-readable form used for prompts and feedback.
    pub fn display(&self) -> String {
        self.accepted().join(", ")
    }
}

/// One vocabulary item of a lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Italian source term, e.g. `"avere"` or `"lo studente"`.
    pub key: String,
    pub target: Target,
    /// Subject pronoun to conjugated form, in lecture order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conjugation: Vec<(String, String)>,
}
