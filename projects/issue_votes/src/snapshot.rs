use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::tally::Votes;

pub const SNAPSHOT_DIR: &str = ".votes";
pub const SNAPSHOT_FILE: &str = "votes.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("CreateDir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialize: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error("Write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn snapshot_path(root: &Path) -> PathBuf {
    root.join(SNAPSHOT_DIR).join(SNAPSHOT_FILE)
}

/// Overwrites `<root>/.votes/votes.json` with the full tally.
pub async fn write_snapshot(root: &Path, votes: &Votes) -> Result<PathBuf, SnapshotError> {
    let dir = root.join(SNAPSHOT_DIR);
    fs::create_dir_all(&dir)
        .await
        .map_err(|source| SnapshotError::CreateDir { path: dir.clone(), source })?;

    let mut json = serde_json::to_string_pretty(votes)?;
    json.push('\n');

    let path = snapshot_path(root);
    fs::write(&path, json)
        .await
        .map_err(|source| SnapshotError::Write { path: path.clone(), source })?;

    debug!(path = %path.display(), issues = votes.len(), "wrote vote snapshot");
    Ok(path)
}
