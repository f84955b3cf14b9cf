//! Configuration from environment variables.

use std::path::PathBuf;

use thiserror::Error;
use vocab_core::{SelectionStrategy, Settings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: '{value}' (expected one of: {expected})")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime configuration of the trainer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub lectures_dir: PathBuf,
    pub progress_dir: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables:
    /// - VOCAB_LECTURES_DIR: directory with `*.json` / `*.txt` lectures (default `lectures`)
    /// - VOCAB_PROGRESS_DIR: where progress files live (default: local data dir)
    /// - VOCAB_SELECTION: `due` or `weighted`
    /// - VOCAB_PER_DIRECTION_PROGRESS: keep a separate file for reverse answers
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lectures_dir = lookup("VOCAB_LECTURES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("lectures"));

        let progress_dir = lookup("VOCAB_PROGRESS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_progress_dir);

        let selection = match lookup("VOCAB_SELECTION") {
            None => SelectionStrategy::default(),
            Some(value) => SelectionStrategy::from_str(value.trim()).ok_or(ConfigError::Invalid {
                var: "VOCAB_SELECTION",
                value,
                expected: "due, weighted",
            })?,
        };

        let per_direction_progress = match lookup("VOCAB_PER_DIRECTION_PROGRESS") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                var: "VOCAB_PER_DIRECTION_PROGRESS",
                value,
                expected: "1, 0, true, false",
            })?,
        };

        Ok(Self {
            lectures_dir,
            progress_dir,
            settings: Settings {
                selection,
                per_direction_progress,
            },
        })
    }

    pub fn forward_progress_path(&self) -> PathBuf {
        self.progress_dir.join("progress.json")
    }

    pub fn reverse_progress_path(&self) -> PathBuf {
        self.progress_dir.join("progress_reverse.json")
    }
}

fn default_progress_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-drill")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.lectures_dir, PathBuf::from("lectures"));
        assert_eq!(config.settings, Settings::default());
        assert!(config.progress_dir.ends_with("vocab-drill"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("VOCAB_LECTURES_DIR", "/data/lectures"),
            ("VOCAB_PROGRESS_DIR", "/data/progress"),
            ("VOCAB_SELECTION", "weighted"),
            ("VOCAB_PER_DIRECTION_PROGRESS", "true"),
        ])
        .unwrap();
        assert_eq!(config.lectures_dir, PathBuf::from("/data/lectures"));
        assert_eq!(config.settings.selection, SelectionStrategy::Weighted);
        assert!(config.settings.per_direction_progress);
        assert_eq!(
            config.reverse_progress_path(),
            PathBuf::from("/data/progress/progress_reverse.json")
        );
    }

    #[test]
    fn rejects_unknown_selection() {
        let err = config_from(&[("VOCAB_SELECTION", "sm2")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid VOCAB_SELECTION: 'sm2' (expected one of: due, weighted)"
        );
    }

    #[test]
    fn rejects_bad_flag() {
        assert!(config_from(&[("VOCAB_PER_DIRECTION_PROGRESS", "maybe")]).is_err());
    }
}
