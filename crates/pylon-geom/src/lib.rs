// SPDX-License-Identifier: Apache-2.0
//! Geometry primitives for Pylon.
//!
//! This crate provides:
//! - UTM → WGS84 inverse projection (`geodetic`).
//! - A heuristic default-zone table for Brazilian federative units (`zone`).
//! - Local meter-per-degree scales and planar distances (`local`).
//! - Great-circle initial bearings (`bearing`).
//! - Catenary cable sampling (`catenary`).
//!
//! Design notes:
//! - Everything here is pure and synchronous: no I/O, no shared state, fresh
//!   output per call. Callers may invoke these from any thread.
//! - Angles are degrees at the API boundary and radians internally.
//! - Float64 throughout; operations favor clarity and reproducibility.
//! - Rustdoc is treated as part of the contract; public items are documented.

/// Great-circle initial bearing between geographic points.
pub mod bearing;
/// Hanging-cable curve sampling.
pub mod catenary;
/// UTM inverse projection onto the WGS84 ellipsoid.
pub mod geodetic;
/// Local planar approximations around a latitude.
pub mod local;
/// Foundational geographic types.
pub mod types;
/// Default UTM zone lookup by region code.
pub mod zone;

pub use bearing::initial_bearing;
pub use catenary::sample as sample_catenary;
pub use geodetic::{to_geodetic, ConversionError, UtmZone};
pub use types::{GeoPoint, LatLon};
