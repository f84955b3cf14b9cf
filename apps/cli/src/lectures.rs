//! Lecture discovery on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use vocab_core::Lecture;

const LECTURE_EXTENSIONS: [&str; 2] = ["json", "txt"];

/// Lecture files in `dir` and its immediate subdirectories (e.g. `nouns/`),
/// sorted by path.
pub fn lecture_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = scan(dir)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(scan(&path)?);
        }
    }
    files.sort();
    Ok(files)
}

fn scan(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("cannot read lectures directory {}", dir.display()))?
    {
        let path = entry?.path();
        let is_lecture = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| LECTURE_EXTENSIONS.contains(&ext));
        if path.is_file() && is_lecture {
            files.push(path);
        }
    }
    Ok(files)
}

/// Lecture name relative to `dir`: the file stem, prefixed by its
/// subdirectory for nested files (`nouns/lezione1`).
fn lecture_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Load every lecture under `dir`. Invalid lectures are logged and skipped.
pub fn load_all(dir: &Path) -> anyhow::Result<Vec<Lecture>> {
    let mut lectures = Vec::new();
    for path in lecture_files(dir)? {
        match Lecture::from_path(&path) {
            Ok(lecture) if lecture.is_empty() => {
                tracing::warn!("Skipping empty lecture {}", path.display());
            }
            Ok(lecture) => lectures.push(lecture.renamed(lecture_name(dir, &path))),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    tracing::info!("Loaded {} lectures from {}", lectures.len(), dir.display());
    Ok(lectures)
}
