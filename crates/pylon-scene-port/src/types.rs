// SPDX-License-Identifier: Apache-2.0
//! Core descriptor types for the rendering contract.
//!
//! Positions are `[longitude, latitude, altitude]` — degrees, degrees,
//! meters — matching the terrain-aware map engines these layers target.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit components.
pub type ColorRgba8 = [u8; 4];

/// Identifier of a render layer, stable across composition passes.
///
/// Adapters use it to reconcile successive layer sets: same id, replace;
/// missing id, tear down.
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    /// Construct a layer id from a static name.
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One placed 3D model in an instanced-model layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInstance {
    /// Element key, stable per source record (e.g. `"tower:42"`).
    pub key: String,
    /// Placement position, `[lon, lat, alt]`.
    pub position: [f64; 3],
    /// Yaw in degrees, 0 = north, clockwise positive.
    pub yaw_deg: f64,
    /// Per-axis scale relative to the authored asset.
    pub scale: [f64; 3],
    /// Instance tint.
    pub color: ColorRgba8,
}

/// One polyline in a path layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathDef {
    /// Element key, stable per source record (e.g. `"span:3:7:phase-1"`).
    pub key: String,
    /// Path vertices, `[lon, lat, alt]` each.
    pub points: Vec<[f64; 3]>,
    /// Line width in pixels.
    pub width: f32,
    /// Line color.
    pub color: ColorRgba8,
}

/// One point in a marker layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerDef {
    /// Element key, stable per source record.
    pub key: String,
    /// Marker position, `[lon, lat, alt]`.
    pub position: [f64; 3],
    /// Marker radius in pixels.
    pub size: f32,
    /// Marker color.
    pub color: ColorRgba8,
}

/// Geometry payload of a layer, tagged by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerGeometry {
    /// Instanced 3D models.
    Models(Vec<ModelInstance>),
    /// Polyline paths.
    Paths(Vec<PathDef>),
    /// Point markers.
    Points(Vec<MarkerDef>),
}

impl LayerGeometry {
    /// Number of elements in the layer.
    pub fn len(&self) -> usize {
        match self {
            Self::Models(v) => v.len(),
            Self::Paths(v) => v.len(),
            Self::Points(v) => v.len(),
        }
    }

    /// True when the layer carries no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Opaque per-layer rendering parameters.
///
/// Interpreted by the adapter; the composer only sets them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Whether the layer takes part in depth testing.
    pub depth_test: bool,
    /// Layer-wide opacity multiplier in `[0, 1]`.
    pub opacity: f64,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            depth_test: true,
            opacity: 1.0,
        }
    }
}

/// A complete renderer-agnostic layer descriptor.
///
/// Produced fresh on every composition pass and never mutated — always
/// rebuilt from current model state so a partially-updated scene can never
/// be observed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderLayer {
    /// Stable layer identity.
    pub id: LayerId,
    /// Geometry payload.
    pub geometry: LayerGeometry,
    /// Opaque rendering parameters.
    pub params: LayerParams,
}
