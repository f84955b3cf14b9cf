pub mod config;
pub mod lectures;
pub mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{ProgressStore, VocabError};

use crate::config::Config;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Lectures in {}, progress in {}",
        config.lectures_dir.display(),
        config.progress_dir.display()
    );

    let lectures = lectures::load_all(&config.lectures_dir)?;
    if lectures.is_empty() {
        anyhow::bail!("no usable lectures in {}", config.lectures_dir.display());
    }

    let mut forward = open_store(config.forward_progress_path())?;
    let mut reverse = if config.settings.per_direction_progress {
        Some(open_store(config.reverse_progress_path())?)
    } else {
        None
    };

    repl::run(
        lectures,
        &config.settings,
        &mut forward,
        reverse.as_mut(),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}

/// Open a progress file. A corrupt file is left untouched and the run
/// continues without persisting.
fn open_store(path: PathBuf) -> anyhow::Result<ProgressStore> {
    match ProgressStore::load(path.clone()) {
        Ok(store) => Ok(store),
        Err(e @ VocabError::CorruptState { .. }) => {
            tracing::warn!("{}; progress of this run will not be saved", e);
            Ok(ProgressStore::in_memory())
        }
        Err(e) => Err(e).with_context(|| format!("cannot open progress file {}", path.display())),
    }
}
