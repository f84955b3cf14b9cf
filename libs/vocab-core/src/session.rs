//! Quiz session: picks items, judges answers and records progress.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{Result, VocabError};
use crate::grammar::{self, Noun};
use crate::lecture::Lecture;
use crate::matching::{compare_answers, MatchStrategy};
use crate::scheduler::EaseScheduler;
use crate::selector::{policy_for, SelectionPolicy};
use crate::store::{ProgressLine, ProgressStore};
use crate::types::{Direction, ExerciseMode, Record, SelectionStrategy};

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub correct: bool,
    /// The expected answer, formatted for feedback.
    pub expected_display: String,
    /// Record stored for the item after this answer.
    pub record: Record,
    /// Conjugation table of the item, if the lecture has one.
    pub conjugation: Vec<(String, String)>,
}

/// Answer counts for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub correct: u32,
    pub wrong: u32,
}

impl SessionStats {
    pub fn total(&self) -> u32 {
        self.correct + self.wrong
    }
}

/// One quiz run over a lecture.
///
/// Records are always keyed by the entry's source key, whatever the
/// direction or mode. With a reverse store attached, reverse-direction
/// answers are scheduled there instead of in the forward store.
pub struct Session<'a> {
    lecture: &'a Lecture,
    forward_store: &'a mut ProgressStore,
    reverse_store: Option<&'a mut ProgressStore>,
    policy: Box<dyn SelectionPolicy>,
    scheduler: EaseScheduler,
    rng: StdRng,
    direction: Direction,
    mode: ExerciseMode,
    history: Vec<String>,
    cursor: Option<usize>,
    stats: SessionStats,
    last_outcome: Option<Outcome>,
}

impl<'a> Session<'a> {
    pub fn new(lecture: &'a Lecture, store: &'a mut ProgressStore) -> Self {
        Self {
            lecture,
            forward_store: store,
            reverse_store: None,
            policy: policy_for(SelectionStrategy::default()),
            scheduler: EaseScheduler::default(),
            rng: StdRng::from_entropy(),
            direction: Direction::default(),
            mode: ExerciseMode::default(),
            history: Vec::new(),
            cursor: None,
            stats: SessionStats::default(),
            last_outcome: None,
        }
    }

    /// Schedule reverse-direction answers in a separate store.
    pub fn with_reverse_store(mut self, store: &'a mut ProgressStore) -> Self {
        self.reverse_store = Some(store);
        self
    }

    pub fn with_policy(mut self, policy: Box<dyn SelectionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn lecture(&self) -> &Lecture {
        self.lecture
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> ExerciseMode {
        self.mode
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Progress lines of the store the current direction schedules into.
    pub fn report(&self, now: DateTime<Utc>) -> Vec<ProgressLine> {
        self.active_store().report(now)
    }

    /// Change direction. History is kept; prompts follow the new direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn toggle_direction(&mut self) -> Direction {
        self.direction = self.direction.toggled();
        self.direction
    }

    /// Change exercise mode and clear the history.
    pub fn set_mode(&mut self, mode: ExerciseMode) -> Result<()> {
        if mode.is_grammar() && self.lecture.noun_keys().is_empty() {
            return Err(VocabError::UnsupportedMode {
                lecture: self.lecture.name().to_string(),
            });
        }
        self.mode = mode;
        self.history.clear();
        self.cursor = None;
        Ok(())
    }

    /// Key of the item under the history cursor.
    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|position| self.history[position].as_str())
    }

    /// Prompt for the item under the history cursor.
    pub fn prompt(&self) -> Option<String> {
        self.current().map(|key| self.prompt_for(key))
    }

    /// Select the next item and return its prompt.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<String> {
        let pool = if self.mode.is_grammar() {
            self.lecture.noun_keys()
        } else {
            self.lecture.keys()
        };

        let store = match (self.direction, self.reverse_store.as_deref()) {
            (Direction::Reverse, Some(store)) => store,
            _ => &*self.forward_store,
        };
        let key = self.policy.pick(&pool, store, now, &mut self.rng)?;
        tracing::debug!("Selected '{}' from {} candidates", key, pool.len());

        let prompt = self.prompt_for(&key);
        self.history.push(key);
        self.cursor = Some(self.history.len() - 1);
        Ok(prompt)
    }

    /// Step back to the previous item. Returns its prompt, or `None` at the oldest item.
    pub fn back(&mut self) -> Option<String> {
        match self.cursor {
            Some(position) if position > 0 => {
                self.cursor = Some(position - 1);
                self.prompt()
            }
            _ => None,
        }
    }

    /// Judge `answer` for the current item, reschedule it and persist progress.
    ///
    /// Stats, policy weights and the in-memory record are updated before the
    /// save. If only the save fails, the error is returned and the verdict
    /// stays available through [`Session::last_outcome`].
    pub fn submit(&mut self, answer: &str, now: DateTime<Utc>) -> Result<Outcome> {
        let lecture = self.lecture;
        let key = self.current().ok_or(VocabError::NoCurrentItem)?.to_string();
        let entry = lecture.get(&key).ok_or(VocabError::NoCurrentItem)?;

        let (correct, expected_display) = match (self.mode, self.direction) {
            (ExerciseMode::Translation, Direction::Forward) => {
                let accepted = entry.target.accepted();
                let result = compare_answers(answer, accepted, MatchStrategy::ArticleInsensitive);
                (result.is_correct, entry.target.display())
            }
            (ExerciseMode::Translation, Direction::Reverse) => {
                let result = compare_answers(answer, &[key.as_str()], MatchStrategy::Exact);
                (result.is_correct, key.clone())
            }
            (ExerciseMode::Plural, _) => {
                let plural = grammar::plural_form(&key)?;
                let result = compare_answers(answer, &[plural.as_str()], MatchStrategy::Exact);
                (result.is_correct, plural)
            }
            (ExerciseMode::IndefiniteArticle, _) => {
                let noun = Noun::parse(&key)?;
                let article = noun.indefinite_article();
                let accepted = [
                    article.to_string(),
                    format!("{} {}", article, noun.root),
                    noun.indefinite_form(),
                ];
                let result = compare_answers(answer, &accepted, MatchStrategy::Exact);
                (result.is_correct, noun.indefinite_form())
            }
        };

        let previous = self.active_store().get_or_default(&key);
        let record = self.scheduler.advance(&previous, correct, now);
        self.active_store_mut().put(&key, record);

        tracing::debug!(
            "Answer for '{}' was {}: interval={} ease={:.2}",
            key,
            if correct { "correct" } else { "wrong" },
            record.interval,
            record.ease
        );

        self.policy.observe(&key, correct);
        if correct {
            self.stats.correct += 1;
        } else {
            self.stats.wrong += 1;
        }

        let outcome = Outcome {
            correct,
            expected_display,
            record,
            conjugation: entry.conjugation.clone(),
        };
        self.last_outcome = Some(outcome.clone());

        self.active_store().save()?;
        Ok(outcome)
    }

    /// Outcome of the latest submission, kept even when saving it failed.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    fn active_store(&self) -> &ProgressStore {
        match (self.direction, self.reverse_store.as_deref()) {
            (Direction::Reverse, Some(store)) => store,
            _ => &*self.forward_store,
        }
    }

    fn active_store_mut(&mut self) -> &mut ProgressStore {
        match (self.direction, self.reverse_store.as_deref_mut()) {
            (Direction::Reverse, Some(store)) => store,
            _ => &mut *self.forward_store,
        }
    }

    fn prompt_for(&self, key: &str) -> String {
        if self.mode.is_grammar() || self.direction == Direction::Forward {
            return key.to_string();
        }
        self.lecture
            .get(key)
            .map(|entry| entry.target.display())
            .unwrap_or_else(|| key.to_string())
    }
}
