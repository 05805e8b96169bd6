// SPDX-License-Identifier: Apache-2.0
//! Tower records and display-label ordering.

use pylon_geom::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Rgba, TowerId};

/// Structural classification of a tower.
///
/// Closed set — the backend validates against the same four values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// Tangent tower carrying the line straight through.
    Suspension,
    /// Tension tower resisting longitudinal load at angles and section ends.
    Anchor,
    /// Line termination at a substation gantry.
    Terminal,
    /// Phase-transposition structure.
    Transposition,
}

impl Default for StructureKind {
    fn default() -> Self {
        Self::Suspension
    }
}

/// A snapshot of one tower record.
///
/// Created and updated by the CRUD layer; the visualization core only reads
/// these. Invariants are checked by [`Tower::validate`] at composition time,
/// and violating towers are omitted rather than aborting the pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    /// Backend identity.
    pub id: TowerId,
    /// Integer sequence code along the line.
    pub code: u32,
    /// Display label, e.g. `"Torre 15/2"`. Carries the compound numbering
    /// used for chain ordering.
    pub label: String,
    /// Geographic position; altitude is the terrain elevation at the base.
    pub position: GeoPoint,
    /// Physical height in meters.
    pub height_m: f64,
    /// Manual yaw override in degrees, added on top of the derived bearing.
    #[serde(default)]
    pub deflection_deg: f64,
    /// Structural classification.
    #[serde(default)]
    pub kind: StructureKind,
    /// Display color.
    #[serde(default)]
    pub color: Rgba,
    /// Hidden towers contribute nothing to any render layer.
    #[serde(default)]
    pub hidden: bool,
}

impl Tower {
    /// Check the record's invariants: non-negative height, latitude in
    /// `[-90, 90]`, longitude in `[-180, 180]`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.height_m < 0.0 {
            return Err(ModelError::NegativeHeight {
                id: self.id,
                height: self.height_m,
            });
        }
        let (lat, lon) = (self.position.lat, self.position.lon);
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ModelError::PositionOutOfDomain {
                id: self.id,
                lat,
                lon,
            });
        }
        Ok(())
    }

    /// Sort key for synthesizing the sequential span chain.
    ///
    /// Prefers the numeric component of the label (see [`sequence_key`]),
    /// falling back to the sequence code when the label has no digits.
    pub fn sequence_key(&self) -> (u32, u32) {
        sequence_key(&self.label).unwrap_or((self.code, 0))
    }
}

/// Extract the ordering key embedded in a display label.
///
/// Supports `"N/M"` compound numbering (`"15/2"` sorts after `"15/1"` and
/// before `"16"`); otherwise the first integer found in the label is the
/// major key. Returns `None` when the label contains no digits.
pub fn sequence_key(label: &str) -> Option<(u32, u32)> {
    let bytes = label.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = start
        + bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
    let major: u32 = label[start..end].parse().ok()?;

    let rest = &bytes[end..];
    if rest.first() == Some(&b'/') {
        let minor_len = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if minor_len > 0 {
            if let Ok(minor) = label[end + 1..end + 1 + minor_len].parse() {
                return Some((major, minor));
            }
        }
    }
    Some((major, 0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tower(label: &str) -> Tower {
        Tower {
            id: TowerId(1),
            code: 7,
            label: label.to_owned(),
            position: GeoPoint::new(-46.6333, -23.5505, 760.0),
            height_m: 45.0,
            deflection_deg: 0.0,
            kind: StructureKind::Suspension,
            color: Rgba::WHITE,
            hidden: false,
        }
    }

    #[test]
    fn plain_numbering() {
        assert_eq!(sequence_key("15"), Some((15, 0)));
        assert_eq!(sequence_key("Torre 15"), Some((15, 0)));
    }

    #[test]
    fn compound_numbering() {
        assert_eq!(sequence_key("15/2"), Some((15, 2)));
        assert_eq!(sequence_key("Torre 15/12"), Some((15, 12)));
    }

    #[test]
    fn compound_ordering_is_lexicographic() {
        let mut keys = vec![
            sequence_key("16").unwrap(),
            sequence_key("15/2").unwrap(),
            sequence_key("15").unwrap(),
            sequence_key("15/1").unwrap(),
        ];
        keys.sort_unstable();
        assert_eq!(keys, vec![(15, 0), (15, 1), (15, 2), (16, 0)]);
    }

    #[test]
    fn no_digits_falls_back_to_code() {
        assert_eq!(sequence_key("Subestação"), None);
        assert_eq!(tower("Subestação").sequence_key(), (7, 0));
    }

    #[test]
    fn slash_without_minor_is_plain() {
        assert_eq!(sequence_key("15/"), Some((15, 0)));
        assert_eq!(sequence_key("15/x"), Some((15, 0)));
    }

    #[test]
    fn validate_accepts_sane_towers() {
        assert!(tower("1").validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_height() {
        let mut t = tower("1");
        t.height_m = -1.0;
        assert!(matches!(
            t.validate(),
            Err(ModelError::NegativeHeight { .. })
        ));
    }

    #[test]
    fn validate_rejects_out_of_domain_positions() {
        let mut t = tower("1");
        t.position.lat = 91.0;
        assert!(matches!(
            t.validate(),
            Err(ModelError::PositionOutOfDomain { .. })
        ));
        let mut t = tower("1");
        t.position.lon = -190.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn structure_kind_round_trips_as_lowercase() {
        let json = serde_json::to_string(&StructureKind::Transposition).unwrap();
        assert_eq!(json, "\"transposition\"");
        let back: StructureKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StructureKind::Transposition);
    }
}
