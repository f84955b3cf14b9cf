//! Due-date selection.

use super::SelectionPolicy;
use crate::error::{Result, VocabError};
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Uniform choice among due keys, falling back to the whole pool when none is due.
pub fn pick_due<R: Rng + ?Sized>(
    pool: &[String],
    store: &ProgressStore,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<String> {
    if pool.is_empty() {
        return Err(VocabError::EmptyPool);
    }

    let due_pool: Vec<&String> = pool.iter().filter(|key| store.is_due(key, now)).collect();
    let chosen = if due_pool.is_empty() {
        tracing::debug!("Nothing due among {} items, picking from full pool", pool.len());
        pool.choose(rng)
    } else {
        due_pool.choose(rng).copied()
    };

    chosen.cloned().ok_or(VocabError::EmptyPool)
}

/// The canonical policy: calendar-scheduled review.
#[derive(Debug, Clone, Copy, Default)]
pub struct DueDatePolicy;

impl SelectionPolicy for DueDatePolicy {
    fn name(&self) -> &'static str {
        "due"
    }

    fn pick(
        &self,
        pool: &[String],
        store: &ProgressStore,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        pick_due(pool, store, now, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{unix_seconds, SECONDS_PER_DAY};
    use crate::types::Record;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn pool(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn scheduled(store: &mut ProgressStore, key: &str, days_ahead: f64) {
        store.put(
            key,
            Record {
                interval: 1,
                due: unix_seconds(now()) + days_ahead * SECONDS_PER_DAY,
                ease: 2.5,
            },
        );
    }

    #[test]
    fn empty_pool_is_an_error() {
        let store = ProgressStore::in_memory();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            pick_due(&[], &store, now(), &mut rng),
            Err(VocabError::EmptyPool)
        ));
    }

    #[test]
    fn never_returns_a_future_key_while_something_is_due() {
        let mut store = ProgressStore::in_memory();
        scheduled(&mut store, "essere", 2.0);
        scheduled(&mut store, "fare", 1.0);
        scheduled(&mut store, "dire", -1.0);
        let keys = pool(&["essere", "avere", "fare", "dire"]);

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let key = pick_due(&keys, &store, now(), &mut rng).unwrap();
            assert!(key == "avere" || key == "dire", "picked {key}");
        }
    }

    #[test]
    fn falls_back_to_full_pool() {
        let mut store = ProgressStore::in_memory();
        scheduled(&mut store, "essere", 2.0);
        scheduled(&mut store, "avere", 3.0);
        let keys = pool(&["essere", "avere"]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let key = pick_due(&keys, &store, now(), &mut rng).unwrap();
            assert!(keys.contains(&key));
        }
    }

    #[test]
    fn due_lookup_uses_normalized_keys() {
        let mut store = ProgressStore::in_memory();
        scheduled(&mut store, "l'amica", 5.0);
        let keys = pool(&["L\u{2019}amica", "la casa"]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(pick_due(&keys, &store, now(), &mut rng).unwrap(), "la casa");
        }
    }

    #[test]
    fn policy_delegates_to_pick_due() {
        let mut store = ProgressStore::in_memory();
        scheduled(&mut store, "essere", 2.0);
        let keys = pool(&["essere", "avere"]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = DueDatePolicy.pick(&keys, &store, now(), &mut rng).unwrap();
        assert_eq!(picked, "avere");
    }
}
