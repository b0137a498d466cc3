//! World state persisted between CLI invocations as a JSON file.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::state::memory::MemoryStub;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to access ledger snapshot '{path}'. {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Malformed ledger snapshot '{path}'. {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Value at key '{key}' is not UTF-8 and can't be written to a snapshot")]
    NonUtf8Value { key: String },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    state: BTreeMap<String, String>,
}

/// Load a snapshot. A missing file is an empty ledger.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MemoryStub, SnapshotError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No ledger snapshot, starting empty");
            return Ok(MemoryStub::new());
        }
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let snapshot: SnapshotFile =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
            path: path.display().to_string(),
            source,
        })?;
    debug!(path = %path.display(), keys = snapshot.state.len(), "Loaded ledger snapshot");

    Ok(MemoryStub::from_state(
        snapshot
            .state
            .into_iter()
            .map(|(k, v)| (k, v.into_bytes()))
            .collect(),
    ))
}

pub fn save<P: AsRef<Path>>(path: P, stub: &MemoryStub) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let mut snapshot = SnapshotFile::default();
    for (k, v) in stub.state().iter() {
        let v = String::from_utf8(v.clone())
            .map_err(|_| SnapshotError::NonUtf8Value { key: k.clone() })?;
        snapshot.state.insert(k.clone(), v);
    }

    let content =
        serde_json::to_string_pretty(&snapshot).map_err(|source| SnapshotError::Json {
            path: path.display().to_string(),
            source,
        })?;

    // Write to a sibling temp file, then rename over the snapshot
    let tmp = temp_path(path);
    fs::write(&tmp, content).map_err(|source| SnapshotError::Io {
        path: tmp.display().to_string(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), keys = snapshot.state.len(), "Saved ledger snapshot");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
