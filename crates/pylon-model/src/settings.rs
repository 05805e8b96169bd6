// SPDX-License-Identifier: Apache-2.0
//! Project-wide cable rendering settings and anchor definitions.

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// One cable attachment point on a tower.
///
/// Anchors are identified by a stable string (`"ground-wire"`, `"phase-1"`,
/// …) so per-project overrides and the cables they generate line up across
/// towers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Stable identifier, shared by every tower in the project.
    pub id: String,
    /// Signed lateral offset from the tower axis, meters.
    pub horizontal_offset_m: f64,
    /// Attachment height as a fraction of tower height, `0..=1`.
    pub vertical_ratio: f64,
    /// Disabled anchors generate neither cables nor markers.
    pub enabled: bool,
    /// Cable render color.
    pub color: Rgba,
    /// Cable render width in pixels.
    pub width: f32,
}

impl Anchor {
    /// Convenience constructor for an enabled anchor.
    pub fn new(id: &str, horizontal_offset_m: f64, vertical_ratio: f64, color: Rgba) -> Self {
        Self {
            id: id.to_owned(),
            horizontal_offset_m,
            vertical_ratio,
            enabled: true,
            color,
            width: 2.0,
        }
    }
}

/// Global cable rendering parameters for one project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CableSettings {
    /// Baseline catenary tension, used when a span carries no override.
    pub tension: f64,
    /// Vertical offset in meters applied to every tower's anchor heights.
    #[serde(default)]
    pub tower_vertical_offset_m: f64,
    /// Opacity multiplier in `[0, 1]` applied to every cable's alpha.
    pub global_opacity: f64,
    /// Attachment points per tower.
    pub anchors: Vec<Anchor>,
}

impl Default for CableSettings {
    /// The common single-circuit arrangement: one ground wire at the peak
    /// and three phase conductors on the crossarm.
    fn default() -> Self {
        let steel = Rgba([120, 124, 130, 255]);
        let aluminum = Rgba([196, 202, 206, 255]);
        Self {
            tension: 1200.0,
            tower_vertical_offset_m: 0.0,
            global_opacity: 1.0,
            anchors: vec![
                Anchor::new("ground-wire", 0.0, 1.0, steel),
                Anchor::new("phase-1", -3.2, 0.82, aluminum),
                Anchor::new("phase-2", 0.0, 0.9, aluminum),
                Anchor::new("phase-3", 3.2, 0.82, aluminum),
            ],
        }
    }
}

impl CableSettings {
    /// The anchors that actually generate geometry.
    pub fn enabled_anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter().filter(|a| a.enabled)
    }
}
