//! Core library of the vocabulary trainer.
//!
//! Provides:
//! - Lecture parsing and validation (JSON and `key: value` text)
//! - Answer normalization and matching
//! - Italian noun grammar rules (plural, indefinite article)
//! - Ease/interval scheduling with persistent progress
//! - Item selection (due-date and weighted policies)
//! - Quiz sessions tying it all together

pub mod error;
pub mod grammar;
pub mod lecture;
pub mod matching;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod store;
pub mod types;

pub use error::{Result, VocabError};
pub use grammar::{indefinite_article, indefinite_form, infer_gender, plural_form, Article, Gender, Noun};
pub use lecture::Lecture;
pub use matching::{compare_answers, normalize, strip_german_article, MatchResult, MatchStrategy};
pub use scheduler::{advance, EaseScheduler};
pub use selector::{get_policy, pick_due, policy_for, SelectionPolicy};
pub use session::{Outcome, Session, SessionStats};
pub use store::{ProgressLine, ProgressStore};
pub use types::{Direction, ExerciseMode, Record, SelectionStrategy, Settings, Target, VocabEntry};
