// SPDX-License-Identifier: Apache-2.0
//! Wire DTOs for the backend's project and tower payloads.
//!
//! The backend paginates tower collections; adapters are expected to drain
//! all pages and hand the concatenated records to [`TowerRecordDto::into_tower`].
//! Fields the visualization core does not consume (`distance`, `embargo`)
//! are still decoded so adapters can log or forward them.

use pylon_model::{Rgba, StructureKind, Tower, TowerId};
use serde::Deserialize;

/// A work/project record as the backend serializes it.
#[derive(Clone, Debug, Deserialize)]
pub struct WorkRecordDto {
    /// Backend id of the work.
    pub id: u64,
    /// Default cable tension for the project.
    #[serde(default)]
    pub tension: Option<f64>,
    /// Conductor phase count.
    #[serde(default)]
    pub phases: Option<u8>,
    /// Federative-unit code (e.g. `"SP"`), the zone-lookup fallback key.
    #[serde(default)]
    pub state: Option<String>,
}

/// The nested coordinate object on a tower record.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CoordinateDto {
    /// Latitude, degrees.
    pub lat: f64,
    /// Longitude, degrees.
    pub lng: f64,
    /// Terrain altitude, meters.
    #[serde(default)]
    pub altitude: Option<f64>,
}

/// A tower record as the backend serializes it.
#[derive(Clone, Debug, Deserialize)]
pub struct TowerRecordDto {
    /// Backend id.
    pub id: u64,
    /// Integer sequence code.
    pub code: u32,
    /// Display label ("tower number" in the backend's vocabulary).
    #[serde(default)]
    pub tower: Option<String>,
    /// Geographic position.
    pub coordinates: CoordinateDto,
    /// Physical height, meters.
    #[serde(default)]
    pub height: Option<f64>,
    /// Distance along the line, meters. Not consumed by the core.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Embargo annotation. Not consumed by the core.
    #[serde(default)]
    pub embargo: Option<String>,
    /// Manual yaw override, degrees.
    #[serde(default)]
    pub deflection: Option<f64>,
    /// Structure type as a lowercase string.
    #[serde(default, rename = "type")]
    pub structure: Option<String>,
    /// Display color as a CSS hex string.
    #[serde(default)]
    pub color: Option<String>,
    /// Hidden flag.
    #[serde(default)]
    pub hidden: Option<bool>,
}

impl TowerRecordDto {
    /// Map the wire record into the domain model.
    ///
    /// Unknown structure types and unparseable colors fall back to
    /// defaults rather than failing — the invariants that matter are
    /// checked later by `Tower::validate`.
    pub fn into_tower(self) -> Tower {
        let kind = match self.structure.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("anchor") => StructureKind::Anchor,
            Some(s) if s.eq_ignore_ascii_case("terminal") => StructureKind::Terminal,
            Some(s) if s.eq_ignore_ascii_case("transposition") => StructureKind::Transposition,
            _ => StructureKind::Suspension,
        };
        let color = self
            .color
            .as_deref()
            .and_then(Rgba::from_hex)
            .unwrap_or_default();
        Tower {
            id: TowerId(self.id),
            code: self.code,
            label: self.tower.unwrap_or_else(|| self.code.to_string()),
            position: pylon_geom::GeoPoint::new(
                self.coordinates.lng,
                self.coordinates.lat,
                self.coordinates.altitude.unwrap_or(0.0),
            ),
            height_m: self.height.unwrap_or(0.0),
            deflection_deg: self.deflection.unwrap_or(0.0),
            kind,
            color,
            hidden: self.hidden.unwrap_or(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_backend_record() {
        let json = r##"{
            "id": 42,
            "code": 15,
            "tower": "Torre 15/2",
            "coordinates": { "lat": -23.5505, "lng": -46.6333, "altitude": 760.0 },
            "height": 45.5,
            "distance": 312.0,
            "embargo": "none",
            "deflection": -2.5,
            "type": "anchor",
            "color": "#ff8000",
            "hidden": false
        }"##;
        let dto: TowerRecordDto = serde_json::from_str(json).unwrap();
        let tower = dto.into_tower();
        assert_eq!(tower.id, TowerId(42));
        assert_eq!(tower.label, "Torre 15/2");
        assert_eq!(tower.kind, StructureKind::Anchor);
        assert_eq!(tower.color, Rgba([255, 128, 0, 255]));
        assert!((tower.position.alt - 760.0).abs() < f64::EPSILON);
        assert!((tower.deflection_deg - -2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sparse_records_fall_back_to_defaults() {
        let json = r#"{
            "id": 1,
            "code": 7,
            "coordinates": { "lat": -23.0, "lng": -46.0 }
        }"#;
        let dto: TowerRecordDto = serde_json::from_str(json).unwrap();
        let tower = dto.into_tower();
        assert_eq!(tower.label, "7");
        assert_eq!(tower.kind, StructureKind::Suspension);
        assert_eq!(tower.color, Rgba::WHITE);
        assert!(!tower.hidden);
        assert!(tower.height_m.abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_structure_type_defaults_to_suspension() {
        let json = r#"{
            "id": 1,
            "code": 7,
            "type": "mystery",
            "coordinates": { "lat": -23.0, "lng": -46.0 }
        }"#;
        let dto: TowerRecordDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.into_tower().kind, StructureKind::Suspension);
    }

    #[test]
    fn work_record_carries_region_fallback() {
        let json = r#"{ "id": 3, "tension": 1500.0, "phases": 3, "state": "SP" }"#;
        let work: WorkRecordDto = serde_json::from_str(json).unwrap();
        assert_eq!(work.state.as_deref(), Some("SP"));
        assert_eq!(work.phases, Some(3));
    }
}
