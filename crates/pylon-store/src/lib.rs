// SPDX-License-Identifier: Apache-2.0
//! Offline snapshot store for Pylon projects.
//!
//! One [`CacheSnapshot`] per project id, overwritten wholesale on every
//! successful fetch — never merged field-by-field, never expired. The
//! snapshot powers instant first paint and fully offline operation; its
//! `captured_at_ms` stamp is metadata for the UI, not a validity gate.
//!
//! The store is an injected handle, constructed once at application start
//! and passed to the pipeline — deliberately not a process-wide singleton,
//! so lifetime and tests stay explicit. Implementations take `&self`; the
//! whole-snapshot replacement discipline keeps concurrent writers safe
//! without a merge protocol (last write wins per project id).

mod fs;
mod memory;
mod snapshot;

pub use fs::FsSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use snapshot::CacheSnapshot;

use pylon_model::ProjectId;
use thiserror::Error;

/// Errors raised by snapshot stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure reading or writing the backing storage.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored snapshot could not be decoded.
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// The platform data directory could not be resolved.
    #[error("other: {0}")]
    Other(String),
}

/// Storage port for per-project snapshots.
///
/// # Absence Semantics
///
/// [`load`](SnapshotStore::load) returns `Ok(None)` for projects that were
/// never cached — that is the normal first-run path, not an error. Error
/// variants are reserved for I/O failures and corrupt data.
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for `project`, if one was ever saved.
    fn load(&self, project: ProjectId) -> Result<Option<CacheSnapshot>, StoreError>;

    /// Persist `snapshot`, replacing any previous snapshot for its project.
    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), StoreError>;
}
