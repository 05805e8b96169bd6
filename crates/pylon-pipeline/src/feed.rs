// SPDX-License-Identifier: Apache-2.0
//! Upstream data ports.
//!
//! The CRUD backend is an external collaborator; the pipeline reaches it
//! through [`TowerFeed`]. An HTTP adapter lives at the application
//! boundary — this crate only defines the contract and ships in-process
//! feeds for tests and tooling.

use async_trait::async_trait;
use pylon_model::{CableSettings, ProjectId, Span, Tower};
use thiserror::Error;

/// One project's worth of fresh data, as returned by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectData {
    /// Tower records, already mapped into the domain model.
    pub towers: Vec<Tower>,
    /// Explicit spans, when the project has surveyed topology.
    pub spans: Option<Vec<Span>>,
    /// Cable rendering settings for the project.
    pub settings: CableSettings,
}

/// Errors crossing the feed boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The backend was unreachable.
    #[error("[FEED_NETWORK] {0}")]
    Network(String),
    /// The backend answered with a failure status.
    #[error("[FEED_BACKEND] status {status}: {message}")]
    Backend {
        /// HTTP-like status code.
        status: u16,
        /// Backend-provided message.
        message: String,
    },
    /// The response payload could not be decoded.
    #[error("[FEED_DECODE] {0}")]
    Decode(String),
}

/// Port over the backend's project/tower endpoints.
#[async_trait]
pub trait TowerFeed: Send + Sync {
    /// Fetch the current data for `project`.
    ///
    /// One attempt — the pipeline adds no retries on top.
    async fn fetch_project(&self, project: ProjectId) -> Result<ProjectData, FeedError>;
}

/// Connectivity signal port.
///
/// When the probe reports offline, a refresh stops after the cache step:
/// no fetch is attempted, and an empty cache yields an empty map rather
/// than an error.
pub trait ConnectivityProbe: Send + Sync {
    /// Best-effort answer to "could a fetch plausibly succeed right now?".
    fn is_online(&self) -> bool;
}

/// Probe for hosts without a connectivity signal: always online.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}
