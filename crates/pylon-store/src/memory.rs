// SPDX-License-Identifier: Apache-2.0
//! In-memory snapshot store.
//!
//! Backs tests and ephemeral sessions (e.g. a preview with no disk
//! access). Same contract as the filesystem store: one snapshot per
//! project, last write wins.

use std::collections::HashMap;
use std::sync::Mutex;

use pylon_model::ProjectId;

use crate::{CacheSnapshot, SnapshotStore, StoreError};

/// In-memory snapshot store keyed by project id.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<ProjectId, CacheSnapshot>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of projects currently cached.
    pub fn len(&self) -> usize {
        self.snapshots.lock().map_or(0, |map| map.len())
    }

    /// True when no project is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, project: ProjectId) -> Result<Option<CacheSnapshot>, StoreError> {
        let map = self
            .snapshots
            .lock()
            .map_err(|_| StoreError::Other("snapshot store poisoned".into()))?;
        Ok(map.get(&project).cloned())
    }

    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), StoreError> {
        let mut map = self
            .snapshots
            .lock()
            .map_err(|_| StoreError::Other("snapshot store poisoned".into()))?;
        map.insert(snapshot.project, snapshot.clone());
        Ok(())
    }
}
