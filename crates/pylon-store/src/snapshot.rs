// SPDX-License-Identifier: Apache-2.0
//! The cached project snapshot.

use pylon_model::{CableSettings, ProjectId, Span, Tower};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything needed to compose a project's layers without the network.
///
/// Captured from a successful fetch and replaced wholesale on the next one.
/// `spans` is `None` for the common case where the chain is synthesized
/// from tower labels; `Some` preserves explicitly surveyed topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// The project this snapshot belongs to — also the storage key.
    pub project: ProjectId,
    /// Tower records at capture time.
    pub towers: Vec<Tower>,
    /// Explicit spans, when the project has them.
    #[serde(default)]
    pub spans: Option<Vec<Span>>,
    /// Cable rendering settings at capture time.
    pub settings: CableSettings,
    /// Capture wall-clock time, milliseconds since the Unix epoch.
    ///
    /// Display metadata only ("data from 3 days ago"); never consulted to
    /// decide whether the snapshot may be used.
    pub captured_at_ms: u64,
}

impl CacheSnapshot {
    /// Build a snapshot stamped with the current wall-clock time.
    pub fn captured_now(
        project: ProjectId,
        towers: Vec<Tower>,
        spans: Option<Vec<Span>>,
        settings: CableSettings,
    ) -> Self {
        let captured_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        Self {
            project,
            towers,
            spans,
            settings,
            captured_at_ms,
        }
    }

    /// The spans to compose with: the explicit set, or empty to request
    /// chain synthesis.
    pub fn effective_spans(&self) -> &[Span] {
        self.spans.as_deref().unwrap_or(&[])
    }
}
