// SPDX-License-Identifier: Apache-2.0
//! The refresh state machine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use pylon_compose::{compose, input_digest, ComposeOptions, InputDigest};
use pylon_model::ProjectId;
use pylon_scene_port::RenderLayer;
use pylon_store::{CacheSnapshot, SnapshotStore};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::feed::{AlwaysOnline, ConnectivityProbe, FeedError, TowerFeed};

/// Events emitted over the caller's channel during a refresh.
#[derive(Debug)]
pub enum PipelineEvent {
    /// Layers composed from the offline snapshot — first paint.
    CachedLayers {
        /// Project the layers belong to.
        project: ProjectId,
        /// The composed layer set.
        layers: Vec<RenderLayer>,
        /// When the underlying snapshot was captured (display metadata).
        captured_at_ms: u64,
    },
    /// Layers composed from a successful fetch — always supersedes any
    /// cached set for the same project.
    FreshLayers {
        /// Project the layers belong to.
        project: ProjectId,
        /// The composed layer set.
        layers: Vec<RenderLayer>,
        /// Content digest of the inputs, for recompose avoidance.
        digest: InputDigest,
    },
    /// The fetch failed. The snapshot is untouched and any cached render
    /// remains valid.
    FetchFailed {
        /// Project the failure belongs to.
        project: ProjectId,
        /// What went wrong.
        error: FeedError,
    },
}

/// Per-project pipeline state.
///
/// `Idle → CacheHit → Fetching → Ready`, with `Fetching → Failed` on
/// error. `Ready` is never downgraded: once fresh data has been shown, a
/// later failed refresh leaves the project `Ready` with its last good
/// render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing loaded yet.
    Idle,
    /// Cached layers are on screen.
    CacheHit,
    /// A fetch is in flight.
    Fetching,
    /// The most recent fetch failed.
    Failed,
    /// Fresh data is on screen.
    Ready,
}

impl PipelineState {
    /// Monotonic rank within one refresh cycle.
    fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::CacheHit => 1,
            Self::Fetching => 2,
            Self::Failed => 3,
            Self::Ready => 4,
        }
    }
}

/// Orchestrates cache-first loading for any number of projects.
///
/// Construct once with an injected store handle and feed adapter; the
/// pipeline holds no per-project data beyond the state map — snapshots
/// live in the store, layers go to the caller.
pub struct MapDataPipeline<F, S, C = AlwaysOnline> {
    feed: F,
    store: Arc<S>,
    connectivity: C,
    options: ComposeOptions,
    states: Mutex<HashMap<ProjectId, PipelineState>>,
}

impl<F, S> MapDataPipeline<F, S>
where
    F: TowerFeed,
    S: SnapshotStore + 'static,
{
    /// Pipeline with no connectivity signal: every refresh attempts the
    /// network.
    pub fn new(feed: F, store: Arc<S>) -> Self {
        Self::with_connectivity(feed, store, AlwaysOnline)
    }
}

impl<F, S, C> MapDataPipeline<F, S, C>
where
    F: TowerFeed,
    S: SnapshotStore + 'static,
    C: ConnectivityProbe,
{
    /// Pipeline with an explicit connectivity probe.
    pub fn with_connectivity(feed: F, store: Arc<S>, connectivity: C) -> Self {
        Self {
            feed,
            store,
            connectivity,
            options: ComposeOptions::default(),
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Composition options applied to both cached and fresh passes.
    pub fn compose_options_mut(&mut self) -> &mut ComposeOptions {
        &mut self.options
    }

    /// Current state for `project`.
    pub fn state(&self, project: ProjectId) -> PipelineState {
        self.states
            .lock()
            .map_or(PipelineState::Idle, |map| {
                map.get(&project).copied().unwrap_or(PipelineState::Idle)
            })
    }

    /// Drive one load cycle for `project`, emitting events on `events`.
    ///
    /// The snapshot read and the network fetch run concurrently; neither
    /// waits for the other. Cached layers are emitted unless the fresh
    /// result landed first — fresh always supersedes cached, never the
    /// reverse. Offline, the cycle stops after the cache step. Returns the
    /// resulting state.
    pub async fn refresh(
        &self,
        project: ProjectId,
        events: &UnboundedSender<PipelineEvent>,
    ) -> PipelineState {
        self.begin(project);
        let online = self.connectivity.is_online();
        if !online {
            debug!(%project, "offline, skipping fetch");
        }
        let fresh_landed = AtomicBool::new(false);

        let cache_pass = self.cache_pass(project, events, &fresh_landed);
        let fetch_pass = self.fetch_pass(project, events, &fresh_landed, online);
        let (cache_hit, fetch_outcome) = tokio::join!(cache_pass, fetch_pass);

        let finished = match fetch_outcome {
            None if cache_hit => PipelineState::CacheHit,
            None => PipelineState::Idle,
            Some(Ok(())) => PipelineState::Ready,
            Some(Err(())) => PipelineState::Failed,
        };
        self.advance(project, finished);
        self.state(project)
    }

    /// Read the snapshot and emit its layers, unless superseded.
    /// Returns whether a cached render was (or would have been) available.
    async fn cache_pass(
        &self,
        project: ProjectId,
        events: &UnboundedSender<PipelineEvent>,
        fresh_landed: &AtomicBool,
    ) -> bool {
        let store = Arc::clone(&self.store);
        let snapshot = match tokio::task::spawn_blocking(move || store.load(project)).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(err)) => {
                warn!(%project, %err, "offline snapshot unreadable, treating as absent");
                None
            }
            Err(err) => {
                warn!(%project, %err, "snapshot read task failed");
                None
            }
        };
        let Some(snapshot) = snapshot else {
            debug!(%project, "no offline snapshot");
            return false;
        };

        let layers = compose(
            &snapshot.towers,
            snapshot.effective_spans(),
            &snapshot.settings,
            &self.options,
        );
        if fresh_landed.load(Ordering::Acquire) {
            debug!(%project, "cached layers superseded by fresh result");
            return true;
        }
        info!(%project, towers = snapshot.towers.len(), "cached layers ready");
        self.advance(project, PipelineState::CacheHit);
        let _ = events.send(PipelineEvent::CachedLayers {
            project,
            layers,
            captured_at_ms: snapshot.captured_at_ms,
        });
        true
    }

    /// Fetch, compose, emit, and overwrite the snapshot.
    /// `None` when offline; `Some(Err)` on fetch failure.
    async fn fetch_pass(
        &self,
        project: ProjectId,
        events: &UnboundedSender<PipelineEvent>,
        fresh_landed: &AtomicBool,
        online: bool,
    ) -> Option<Result<(), ()>> {
        if !online {
            return None;
        }
        self.advance(project, PipelineState::Fetching);

        let data = match self.feed.fetch_project(project).await {
            Ok(data) => data,
            Err(error) => {
                warn!(%project, %error, "fetch failed, keeping last snapshot");
                let _ = events.send(PipelineEvent::FetchFailed { project, error });
                return Some(Err(()));
            }
        };

        let spans = data.spans.as_deref().unwrap_or(&[]);
        let layers = compose(&data.towers, spans, &data.settings, &self.options);
        let digest = input_digest(&data.towers, spans, &data.settings);
        info!(%project, towers = data.towers.len(), %digest, "fresh layers ready");
        fresh_landed.store(true, Ordering::Release);
        let _ = events.send(PipelineEvent::FreshLayers {
            project,
            layers,
            digest,
        });

        let snapshot =
            CacheSnapshot::captured_now(project, data.towers, data.spans, data.settings);
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.save(&snapshot)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(%project, %err, "snapshot write failed"),
            Err(err) => warn!(%project, %err, "snapshot write task failed"),
        }
        Some(Ok(()))
    }

    /// Reset a project for a new cycle. `Ready` survives — it is never
    /// downgraded by a later refresh.
    fn begin(&self, project: ProjectId) {
        if let Ok(mut map) = self.states.lock() {
            let state = map.entry(project).or_insert(PipelineState::Idle);
            if *state != PipelineState::Ready {
                *state = PipelineState::Idle;
            }
        }
    }

    /// Publish `next` if it outranks the current state. `Ready` always
    /// publishes; nothing ever replaces it except another `Ready`.
    fn advance(&self, project: ProjectId, next: PipelineState) {
        if let Ok(mut map) = self.states.lock() {
            let state = map.entry(project).or_insert(PipelineState::Idle);
            if next.rank() > state.rank() || next == PipelineState::Ready {
                *state = next;
            }
        }
    }
}
