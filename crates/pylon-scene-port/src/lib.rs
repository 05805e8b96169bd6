// SPDX-License-Identifier: Apache-2.0
//! Render-layer contract for Pylon renderers.
//!
//! This crate defines the boundary between the layer composer and whatever
//! 3D engine draws the map. The composer emits a fresh, ordered list of
//! [`RenderLayer`] descriptors per pass; adapters implement [`ScenePort`]
//! and draw them. Nothing here knows about towers or cables — only
//! geometry kinds, positions, and styles.
//!
//! # Design Principles
//!
//! - **Renderers are dumb** — they receive descriptors and draw. No domain
//!   logic, no incremental patching.
//! - **Wholesale replacement** — each `apply_layers` call supersedes the
//!   previous layer set; a layer absent from the new list is torn down by
//!   the adapter. Descriptors are never mutated in place.
//! - **Change detection is the caller's concern** — the composer exposes a
//!   content digest over its inputs; adapters need no diffing of their own.
//!
//! Descriptors derive serde so tooling can write them as JSON; in-process
//! adapters consume the structs directly.

use thiserror::Error;

/// Error type adapters may surface while applying a layer set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// A descriptor violated an adapter invariant (e.g. duplicate layer id).
    #[error("invariant violation: {0}")]
    Invariant(String),
    /// A backend-specific failure (lost device, exhausted buffers, …).
    #[error("backend error: {0}")]
    Backend(String),
}

mod canon;
mod port;
mod types;

pub use canon::{canonicalize_f64, canonicalize_position};
pub use port::ScenePort;
pub use types::{
    ColorRgba8, LayerGeometry, LayerId, LayerParams, MarkerDef, ModelInstance, PathDef,
    RenderLayer,
};
