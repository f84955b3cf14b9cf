//! Weighted sampling without due dates.
//!
//! Every key starts at weight 1. A wrong answer adds 2, a right answer
//! subtracts 1 down to a floor of 1. Weights live only for the session.

use std::collections::HashMap;

use super::SelectionPolicy;
use crate::error::{Result, VocabError};
use crate::matching::normalize;
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;

const INITIAL_WEIGHT: u32 = 1;
const MISS_PENALTY: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct WeightedPolicy {
    weights: HashMap<String, u32>,
}

impl WeightedPolicy {
    pub fn weight(&self, key: &str) -> u32 {
        self.weights
            .get(&normalize(key))
            .copied()
            .unwrap_or(INITIAL_WEIGHT)
    }
}

impl SelectionPolicy for WeightedPolicy {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn pick(
        &self,
        pool: &[String],
        _store: &ProgressStore,
        _now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        if pool.is_empty() {
            return Err(VocabError::EmptyPool);
        }
        let dist = WeightedIndex::new(pool.iter().map(|key| self.weight(key)))
            .map_err(|_| VocabError::EmptyPool)?;
        Ok(pool[dist.sample(rng)].clone())
    }

    fn observe(&mut self, key: &str, correct: bool) {
        let weight = self.weights.entry(normalize(key)).or_insert(INITIAL_WEIGHT);
        *weight = if correct {
            weight.saturating_sub(1).max(INITIAL_WEIGHT)
        } else {
            *weight + MISS_PENALTY
        };
    }
}
