// SPDX-License-Identifier: Apache-2.0
//! Local planar approximations around a latitude.
//!
//! Tower spans are a few hundred meters; at that scale a flat-earth
//! approximation with a latitude-dependent longitude scale is accurate to
//! well under the width of a conductor. The same scales are used everywhere
//! a meter offset must become a degree delta (catenary spans, anchor
//! offsets) so the geometry stays mutually consistent.

use crate::types::LatLon;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Meters per degree of longitude at the given latitude.
pub fn meters_per_degree_lon(lat_deg: f64) -> f64 {
    METERS_PER_DEGREE_LAT * lat_deg.to_radians().cos()
}

/// Horizontal distance in meters between two positions.
///
/// The longitude delta is scaled at the mean latitude of the two endpoints.
pub fn horizontal_distance_m(a: LatLon, b: LatLon) -> f64 {
    let mean_lat = (a.lat + b.lat) / 2.0;
    let dx = (b.lon - a.lon) * meters_per_degree_lon(mean_lat);
    let dy = (b.lat - a.lat) * METERS_PER_DEGREE_LAT;
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude() {
        let a = LatLon::new(-23.0, -46.0);
        let b = LatLon::new(-24.0, -46.0);
        let d = horizontal_distance_m(a, b);
        assert!((d - METERS_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn longitude_shrinks_away_from_equator() {
        let at_equator = meters_per_degree_lon(0.0);
        let at_sp = meters_per_degree_lon(-23.55);
        assert!(at_equator > at_sp);
        assert!((at_equator - METERS_PER_DEGREE_LAT).abs() < 1e-9);
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        let p = LatLon::new(-23.55, -46.63);
        assert_eq!(horizontal_distance_m(p, p), 0.0);
    }
}
