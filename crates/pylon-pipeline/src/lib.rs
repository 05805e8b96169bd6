// SPDX-License-Identifier: Apache-2.0
//! Map data pipeline for Pylon.
//!
//! [`MapDataPipeline::refresh`] drives one load cycle for a project:
//!
//! 1. Read the offline snapshot and emit its composed layers immediately
//!    (stale-while-revalidate — the snapshot has no expiry).
//! 2. In parallel, fetch fresh data over the [`TowerFeed`] port; on success
//!    recompose, emit, and overwrite the snapshot wholesale.
//! 3. On fetch failure, emit [`PipelineEvent::FetchFailed`] and leave the
//!    snapshot untouched — the last good render stays visible.
//!
//! The cache read is neither blocked on nor cancelled by the fetch; both
//! may be in flight at once, and the network result always supersedes the
//! cached one when it arrives, never the reverse. One fetch attempt per
//! `refresh` call — retry is the caller's decision.

mod dto;
mod feed;
mod pipeline;

pub use dto::{CoordinateDto, TowerRecordDto, WorkRecordDto};
pub use feed::{AlwaysOnline, ConnectivityProbe, FeedError, ProjectData, TowerFeed};
pub use pipeline::{MapDataPipeline, PipelineEvent, PipelineState};
