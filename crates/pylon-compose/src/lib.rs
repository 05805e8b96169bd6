// SPDX-License-Identifier: Apache-2.0
//! Layer composition for Pylon.
//!
//! [`compose`] turns a snapshot of towers, spans, and cable settings into
//! the ordered list of [`RenderLayer`] descriptors the renderer consumes:
//! an instanced tower-model layer, a cable-path layer (one catenary per
//! span × enabled anchor), and an anchor-marker layer for visual
//! verification.
//!
//! Composition is deterministic and fully re-derived on every call — there
//! is no incremental diffing here. Hosts that want to skip redundant passes
//! compare [`input_digest`] values over the same inputs; render-cost
//! avoidance is the renderer's concern, not this crate's.
//!
//! Failure policy: a tower violating its invariants, or a span referencing
//! a missing or identical tower, is omitted from its layer. Composition
//! never aborts for the whole project.

mod anchors;
mod chain;
mod compose;
mod digest;
mod orient;

pub use anchors::anchor_world_position;
pub use chain::synthesize_spans;
pub use compose::{compose, ComposeOptions};
pub use digest::{input_digest, InputDigest};
pub use orient::{tower_bearings, SpanGraph};

/// Authored height of the base tower asset, meters.
///
/// Tower instances are scaled by `height_m / REFERENCE_MODEL_HEIGHT_M`
/// uniformly in all three axes.
pub const REFERENCE_MODEL_HEIGHT_M: f64 = 30.0;
