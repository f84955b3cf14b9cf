//! Item selection policies.
//!
//! Two incompatible models exist: calendar-scheduled review over due items
//! ([`due::DueDatePolicy`], the default) and weight-proportional sampling
//! with no due dates ([`weighted::WeightedPolicy`]). A session uses exactly
//! one of them.

pub mod due;
pub mod weighted;

pub use due::pick_due;

use crate::error::Result;
use crate::store::ProgressStore;
use crate::types::SelectionStrategy;
use chrono::{DateTime, Utc};
use rand::RngCore;

/// Trait for item selection policies.
pub trait SelectionPolicy: Send {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Choose the next key from `pool`. An empty pool is an error.
    fn pick(
        &self,
        pool: &[String],
        store: &ProgressStore,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<String>;

    /// Feed back the outcome of an answer.
    fn observe(&mut self, _key: &str, _correct: bool) {}
}

/// Get policy by name.
pub fn get_policy(name: &str) -> Option<Box<dyn SelectionPolicy>> {
    SelectionStrategy::from_str(name).map(policy_for)
}

/// Policy implementing `strategy`.
pub fn policy_for(strategy: SelectionStrategy) -> Box<dyn SelectionPolicy> {
    match strategy {
        SelectionStrategy::Due => Box::new(due::DueDatePolicy),
        SelectionStrategy::Weighted => Box::new(weighted::WeightedPolicy::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_by_name() {
        assert_eq!(get_policy("due").unwrap().name(), "due");
        assert_eq!(get_policy("weighted").unwrap().name(), "weighted");
        assert!(get_policy("fsrs").is_none());
    }
}
