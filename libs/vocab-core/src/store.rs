//! Persistent per-item progress.
//!
//! The progress file is a JSON object mapping normalized item keys to
//! [`Record`]s. Saves go through a temporary file in the same directory that
//! is renamed over the target, so readers never see a partial write.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Result, VocabError};
use crate::matching::normalize;
use crate::scheduler::{unix_seconds, SECONDS_PER_DAY};
use crate::types::Record;

/// One line of the progress report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressLine {
    pub key: String,
    pub interval: u32,
    pub ease: f64,
    /// Whole days until due, truncated toward zero; negative when overdue.
    pub due_in_days: i64,
}

/// Mapping from normalized item key to its scheduling record.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    path: Option<PathBuf>,
    records: BTreeMap<String, Record>,
}

impl ProgressStore {
    /// Store without a backing file; `save` does nothing.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store backed by `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No progress file at {}, starting empty", path.display());
                return Ok(Self {
                    path: Some(path),
                    records: BTreeMap::new(),
                });
            }
            Err(source) => return Err(VocabError::Persistence { path, source }),
        };

        let records: BTreeMap<String, Record> =
            serde_json::from_str(&content).map_err(|e| VocabError::CorruptState {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if let Some((key, record)) = records.iter().find(|(_, r)| !is_valid(r)) {
            return Err(VocabError::CorruptState {
                path,
                reason: format!(
                    "record '{}' out of range (interval={}, ease={})",
                    key, record.interval, record.ease
                ),
            });
        }

        tracing::info!("Loaded {} progress records from {}", records.len(), path.display());
        Ok(Self {
            path: Some(path),
            records,
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored record for `key`, or the default for unseen items. Never inserts.
    pub fn get_or_default(&self, key: &str) -> Record {
        self.records
            .get(&normalize(key))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_due(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.get_or_default(key).is_due(now)
    }

    pub fn put(&mut self, key: &str, record: Record) {
        self.records.insert(normalize(key), record);
    }

    /// Write the whole mapping to the backing file.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        write_atomically(path, &self.records).map_err(|source| VocabError::Persistence {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} progress records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Records sorted by interval, longest first.
    pub fn report(&self, now: DateTime<Utc>) -> Vec<ProgressLine> {
        let now_secs = unix_seconds(now);
        let mut lines: Vec<ProgressLine> = self
            .records
            .iter()
            .map(|(key, record)| ProgressLine {
                key: key.clone(),
                interval: record.interval,
                ease: record.ease,
                due_in_days: ((record.due - now_secs) / SECONDS_PER_DAY) as i64,
            })
            .collect();
        lines.sort_by(|a, b| b.interval.cmp(&a.interval));
        lines
    }
}

fn is_valid(record: &Record) -> bool {
    record.interval >= 1
        && (1.3..=3.0).contains(&record.ease)
        && record.due.is_finite()
}

fn write_atomically(path: &Path, records: &BTreeMap<String, Record>) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer(&mut file, records)?;
    file.flush()?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
