// SPDX-License-Identifier: Apache-2.0
//! Filesystem-backed snapshot store (uses the platform data dir).

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use pylon_model::ProjectId;

use crate::{CacheSnapshot, SnapshotStore, StoreError};

/// Store snapshots as JSON files, one per project.
///
/// Writes go through a temp file in the same directory followed by a
/// rename, so a crash mid-write can never leave a torn snapshot — the
/// previous one survives intact.
pub struct FsSnapshotStore {
    base: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at the user data directory
    /// (e.g. `~/.local/share/pylon/snapshots`).
    pub fn new() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("br", "linhaviva", "pylon")
            .ok_or_else(|| StoreError::Other("could not resolve data dir".into()))?;
        Self::at(proj.data_dir().join("snapshots"))
    }

    /// Create a store rooted at an explicit directory. Used by tests and
    /// by hosts that manage their own storage layout.
    pub fn at(base: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    fn path_for(&self, project: ProjectId) -> PathBuf {
        self.base.join(format!("project-{project}.json"))
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self, project: ProjectId) -> Result<Option<CacheSnapshot>, StoreError> {
        let path = self.path_for(project);
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), StoreError> {
        let path = self.path_for(snapshot.project);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
