// SPDX-License-Identifier: Apache-2.0
//! Anchor attachment geometry.

use pylon_geom::local::meters_per_degree_lon;
use pylon_geom::GeoPoint;
use pylon_model::{Anchor, CableSettings, Tower};

/// World position of one anchor on one tower.
///
/// The horizontal offset is applied as a longitude delta through the local
/// meter-per-degree scale at the tower's latitude — the same scale the
/// catenary uses, so cables meet their anchors exactly. The altitude is
/// `height · vertical_ratio + tower_vertical_offset`; terrain elevation is
/// the renderer's concern (layers drape onto its terrain).
pub fn anchor_world_position(tower: &Tower, anchor: &Anchor, settings: &CableSettings) -> GeoPoint {
    let lon_delta = anchor.horizontal_offset_m / meters_per_degree_lon(tower.position.lat);
    GeoPoint::new(
        tower.position.lon + lon_delta,
        tower.position.lat,
        tower.height_m * anchor.vertical_ratio + settings.tower_vertical_offset_m,
    )
}
