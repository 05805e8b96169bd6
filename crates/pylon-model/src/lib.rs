// SPDX-License-Identifier: Apache-2.0
//! Domain model for Pylon.
//!
//! Pure data types shared by the composer, store, pipeline, and import
//! crates: towers, spans, cable settings, and anchors, plus the invariant
//! checks the composition pass relies on. The CRUD backend owns the
//! lifecycle of these records; this crate only describes snapshots of them.
//!
//! Serialization is plain serde — snapshots are encoded as JSON by
//! `pylon-store` and the CLI.

mod color;
mod ids;
mod settings;
mod span;
mod tower;

pub use color::Rgba;
pub use ids::{ProjectId, TowerId};
pub use settings::{Anchor, CableSettings};
pub use span::Span;
pub use tower::{sequence_key, StructureKind, Tower};

use thiserror::Error;

/// Invariant violations detected on model snapshots.
///
/// These are data-quality errors, not programming errors: the composition
/// pass skips the offending element and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Tower height must be non-negative.
    #[error("[MODEL_BAD_HEIGHT] tower {id} has negative height {height}")]
    NegativeHeight {
        /// The offending tower.
        id: TowerId,
        /// The rejected height in meters.
        height: f64,
    },
    /// Latitude outside `[-90, 90]` or longitude outside `[-180, 180]`.
    #[error("[MODEL_BAD_POSITION] tower {id} position ({lat}, {lon}) is out of domain")]
    PositionOutOfDomain {
        /// The offending tower.
        id: TowerId,
        /// Rejected latitude, degrees.
        lat: f64,
        /// Rejected longitude, degrees.
        lon: f64,
    },
    /// A span must connect two distinct towers.
    #[error("[MODEL_SELF_SPAN] span connects tower {0} to itself")]
    SelfSpan(TowerId),
}
