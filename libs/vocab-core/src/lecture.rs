//! Lecture parsing and validation.
//!
//! # JSON format
//! ```json
//! {
//!   "avere": { "de": "haben", "conjugation": { "io": "ho", "tu": "hai" } },
//!   "andare": { "de": ["gehen", "fahren"] },
//!   "essere": "sein"
//! }
//! ```
//!
//! # Text format
//! ```text
//! avere: haben
//! essere: sein
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, VocabError};
use crate::grammar::Noun;
use crate::types::{Target, VocabEntry};

/// A named, ordered collection of vocabulary entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Lecture {
    name: String,
    entries: Vec<VocabEntry>,
    index: HashMap<String, usize>,
}

impl Lecture {
    /// Build a lecture; a repeated key replaces the earlier entry in place.
    pub fn new(name: impl Into<String>, entries: impl IntoIterator<Item = VocabEntry>) -> Self {
        let mut lecture = Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            match lecture.index.get(&entry.key) {
                Some(&position) => lecture.entries[position] = entry,
                None => {
                    lecture.index.insert(entry.key.clone(), lecture.entries.len());
                    lecture.entries.push(entry);
                }
            }
        }
        lecture
    }

    /// Parse a JSON lecture, rejecting entries of the wrong shape.
    pub fn from_json(name: &str, content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content).map_err(|e| VocabError::LectureFormat {
            lecture: name.to_string(),
            reason: e.to_string(),
        })?;
        let Value::Object(map) = root else {
            return Err(VocabError::LectureFormat {
                lecture: name.to_string(),
                reason: "expected a JSON object at the top level".to_string(),
            });
        };

        let entries = map
            .into_iter()
            .map(|(key, value)| parse_entry(name, key, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, entries))
    }

    /// Parse `italiano: deutsch` lines. Lines without a colon are skipped.
    pub fn from_text(name: &str, content: &str) -> Self {
        let entries = content.lines().filter_map(|line| {
            let (source, target) = line.trim().split_once(':')?;
            Some(VocabEntry {
                key: source.trim().to_string(),
                target: Target::Single(target.trim().to_string()),
                conjugation: Vec::new(),
            })
        });
        Self::new(name, entries)
    }

    /// Load a `.json` or `.txt` lecture; the file stem becomes the lecture name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| VocabError::LectureRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let lecture = if path.extension().is_some_and(|ext| ext == "txt") {
            Self::from_text(&name, &content)
        } else {
            Self::from_json(&name, &content).map_err(|e| name_file(e, path))?
        };

        tracing::debug!(
            "Loaded lecture '{}' with {} entries from {}",
            lecture.name,
            lecture.len(),
            path.display()
        );
        Ok(lecture)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&VocabEntry> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    /// Source keys in lecture order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Keys that carry an Italian definite article, usable in grammar drills.
    pub fn noun_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| Noun::parse(&entry.key).is_ok())
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Same entries under another name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// One pool drawn from several lectures, named `a+b+...`.
    ///
    /// Entries keep lecture order; a key present in more than one part takes
    /// the entry of the last part.
    pub fn combine(parts: &[&Lecture]) -> Self {
        let name = parts
            .iter()
            .map(|lecture| lecture.name())
            .collect::<Vec<_>>()
            .join("+");
        Self::new(
            name,
            parts
                .iter()
                .flat_map(|lecture| lecture.entries().iter().cloned()),
        )
    }
}

fn parse_entry(lecture: &str, key: String, value: Value) -> Result<VocabEntry> {
    let invalid = |key: &str, reason: &str| VocabError::Validation {
        lecture: lecture.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    };

    match value {
        Value::String(target) => Ok(VocabEntry {
            key,
            target: Target::Single(target),
            conjugation: Vec::new(),
        }),
        Value::Object(mut fields) => {
            let target = match fields.remove("de") {
                None => return Err(invalid(&key, "missing 'de'")),
                Some(Value::String(target)) => Target::Single(target),
                Some(Value::Array(items)) if !items.is_empty() => Target::Many(
                    items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => Ok(s),
                            _ => Err(invalid(&key, "'de' list must contain only strings")),
                        })
                        .collect::<Result<Vec<_>>>()?,
                ),
                Some(_) => {
                    return Err(invalid(&key, "'de' must be a string or a non-empty list of strings"))
                }
            };

            let conjugation = match fields.remove("conjugation") {
                None => Vec::new(),
                Some(Value::Object(table)) => parse_conjugation(table)
                    .ok_or_else(|| invalid(&key, "conjugation forms must be strings"))?,
                Some(_) => return Err(invalid(&key, "'conjugation' must be an object")),
            };

            Ok(VocabEntry {
                key,
                target,
                conjugation,
            })
        }
        _ => Err(invalid(&key, "expected a string or an object with 'de'")),
    }
}

fn parse_conjugation(table: Map<String, Value>) -> Option<Vec<(String, String)>> {
    table
        .into_iter()
        .map(|(pronoun, form)| match form {
            Value::String(form) => Some((pronoun, form)),
            _ => None,
        })
        .collect()
}

fn name_file(error: VocabError, path: &Path) -> VocabError {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match error {
        VocabError::Validation { key, reason, .. } => VocabError::Validation {
            lecture: file,
            key,
            reason,
        },
        VocabError::LectureFormat { reason, .. } => VocabError::LectureFormat {
            lecture: file,
            reason,
        },
        other => other,
    }
}
