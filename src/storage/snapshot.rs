//! Index Snapshots
//!
//! JSON persistence for [`MemoryIndex`]. Writes go to a temporary file in the
//! target directory and are renamed into place, so a crash mid-write leaves
//! the previous snapshot intact.

use super::memory::MemoryIndex;
use crate::error::{QueryError, QueryResult};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexSnapshot {
    /// Frequency map.
    pub scores: BTreeMap<String, u64>,
    /// Lexical set, ascending.
    pub lexical: Vec<String>,
}

pub fn save_snapshot(index: &MemoryIndex, path: &Path) -> QueryResult<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(snapshot_err)?;

    let snapshot = index.snapshot();
    let temp_file = NamedTempFile::new_in(parent_dir).map_err(snapshot_err)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer(&mut writer, &snapshot).map_err(snapshot_err)?;
        writer.flush().map_err(snapshot_err)?;
    }
    temp_file.persist(path).map_err(snapshot_err)?;

    tracing::debug!(
        "Saved index snapshot with {} n-grams to {}",
        snapshot.lexical.len(),
        path.display()
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> QueryResult<MemoryIndex> {
    let file = File::open(path).map_err(snapshot_err)?;
    let snapshot: IndexSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(snapshot_err)?;

    tracing::info!(
        "Loaded index snapshot with {} n-grams from {}",
        snapshot.lexical.len(),
        path.display()
    );
    Ok(MemoryIndex::from_snapshot(snapshot))
}

/// Restores the snapshot at `path` when it exists, otherwise starts empty.
pub fn load_or_new(path: &Path) -> QueryResult<MemoryIndex> {
    if path.exists() {
        load_snapshot(path)
    } else {
        tracing::info!("No snapshot at {}, starting with an empty index", path.display());
        Ok(MemoryIndex::new())
    }
}

fn snapshot_err<E: std::fmt::Display>(err: E) -> QueryError {
    QueryError::Snapshot(err.to_string())
}
