//! Ease/interval review scheduler.
//!
//! A correct answer multiplies the interval by the ease factor and nudges the
//! ease up; a wrong answer resets the interval to one day and lowers the ease.

use crate::types::Record;
use chrono::{DateTime, Utc};

/// Seconds in one scheduling day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a timestamp to fractional unix seconds, the unit stored in `Record::due`.
pub fn unix_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}

/// Scheduler parameters.
#[derive(Debug, Clone)]
pub struct EaseScheduler {
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    pub ease_bonus: f64,
    pub ease_penalty: f64,
}

impl Default for EaseScheduler {
    fn default() -> Self {
        Self {
            minimum_ease: 1.3,
            maximum_ease: 3.0,
            ease_bonus: 0.1,
            ease_penalty: 0.2,
        }
    }
}

impl EaseScheduler {
    /// Compute the record that follows `record` after an answer at `now`.
    pub fn advance(&self, record: &Record, correct: bool, now: DateTime<Utc>) -> Record {
        let (interval, ease) = if correct {
            let grown = (f64::from(record.interval) * record.ease).floor() as u32;
            (grown.max(1), (record.ease + self.ease_bonus).min(self.maximum_ease))
        } else {
            (1, (record.ease - self.ease_penalty).max(self.minimum_ease))
        };

        Record {
            interval,
            ease,
            due: unix_seconds(now) + f64::from(interval) * SECONDS_PER_DAY,
        }
    }
}

/// Advance `record` with the default parameters.
pub fn advance(record: &Record, correct: bool, now: DateTime<Utc>) -> Record {
    EaseScheduler::default().advance(record, correct, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wrong_answer_resets_interval() {
        let record = Record {
            interval: 12,
            due: 0.0,
            ease: 2.8,
        };
        let next = advance(&record, false, now());
        assert_eq!(next.interval, 1);
        assert!(approx(next.ease, 2.6));
        assert!(approx(next.due, unix_seconds(now()) + SECONDS_PER_DAY));
    }

    #[test]
    fn ease_never_below_minimum() {
        let record = Record {
            interval: 3,
            due: 0.0,
            ease: 1.4,
        };
        let next = advance(&record, false, now());
        assert_eq!(next.ease, 1.3);
        assert_eq!(advance(&next, false, now()).ease, 1.3);
    }

    #[test]
    fn ease_never_above_maximum() {
        let record = Record {
            interval: 3,
            due: 0.0,
            ease: 2.95,
        };
        assert_eq!(advance(&record, true, now()).ease, 3.0);
    }

    #[test]
    fn correct_answer_floors_interval_product() {
        let record = Record {
            interval: 3,
            due: 0.0,
            ease: 2.5,
        };
        let next = advance(&record, true, now());
        assert_eq!(next.interval, 7);
        assert!(approx(next.due, unix_seconds(now()) + 7.0 * SECONDS_PER_DAY));
    }

    #[test]
    fn interval_never_below_one() {
        let scheduler = EaseScheduler {
            minimum_ease: 0.1,
            ..Default::default()
        };
        let record = Record {
            interval: 1,
            due: 0.0,
            ease: 0.5,
        };
        assert_eq!(scheduler.advance(&record, true, now()).interval, 1);
    }

    #[test]
    fn consecutive_correct_answers_grow_monotonically() {
        let mut record = Record::default();
        let mut previous = record;
        for _ in 0..10 {
            record = advance(&record, true, now());
            assert!(record.interval >= previous.interval);
            assert!(record.ease >= previous.ease);
            assert!(record.ease <= 3.0);
            previous = record;
        }
        assert_eq!(record.ease, 3.0);
    }

    #[test]
    fn due_strictly_increases_on_correct_answers() {
        let first = advance(&Record::default(), true, now());
        let later = now() + chrono::Duration::days(first.interval as i64);
        let second = advance(&first, true, later);
        assert!(second.due > first.due);
    }

    #[test]
    fn wrong_then_correct_chain() {
        let wrong = advance(&Record::default(), false, now());
        assert_eq!(wrong.interval, 1);
        assert!(approx(wrong.ease, 2.3));

        let right = advance(&wrong, true, now());
        assert_eq!(right.interval, 2);
        assert!(approx(right.ease, 2.4));
        assert!(approx(right.due, unix_seconds(now()) + 2.0 * SECONDS_PER_DAY));
    }
}
