// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

//! Round-trip validation of the UTM inverse against a reference forward
//! transverse Mercator projection implemented independently below.

use pylon_geom::geodetic::{FLATTENING, SCALE_FACTOR, SEMI_MAJOR_AXIS_M};
use pylon_geom::{to_geodetic, LatLon, UtmZone};

/// Reference forward projection (Snyder's series), used only as a test
/// oracle. Returns (easting, northing) for the given zone.
fn forward_utm(point: LatLon, zone: UtmZone) -> (f64, f64) {
    let a = SEMI_MAJOR_AXIS_M;
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);
    let k0 = SCALE_FACTOR;

    let phi = point.lat.to_radians();
    let lambda = point.lon.to_radians();
    let lambda0 = zone.central_meridian_deg().to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let big_a = cos_phi * (lambda - lambda0);

    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2 * e2 * e2 / 1024.0)
                * (2.0 * phi).sin()
            + (15.0 * e2 * e2 / 256.0 + 45.0 * e2 * e2 * e2 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e2 * e2 * e2 / 3072.0) * (6.0 * phi).sin());

    let easting = k0
        * n
        * (big_a
            + (1.0 - t + c) * big_a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * big_a.powi(5) / 120.0)
        + 500_000.0;

    let mut northing = k0
        * (m + n
            * tan_phi
            * (big_a * big_a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * big_a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * big_a.powi(6) / 720.0));
    if zone.is_southern() {
        northing += 10_000_000.0;
    }
    (easting, northing)
}

#[test]
fn sao_paulo_sample_tower_matches_seed_data() {
    let zone = UtmZone::parse("23K").unwrap();
    let geo = to_geodetic(333_675.0, 7_394_520.0, zone).unwrap();
    assert!(
        (geo.lat - -23.5505).abs() < 0.01,
        "latitude off: {}",
        geo.lat
    );
    assert!(
        (geo.lon - -46.6333).abs() < 0.01,
        "longitude off: {}",
        geo.lon
    );
}

#[test]
fn northern_hemisphere_keeps_raw_northing() {
    // Central Colombia, zone 18N: no false-northing subtraction.
    let zone = UtmZone::parse("18N").unwrap();
    let geo = to_geodetic(500_000.0, 500_000.0, zone).unwrap();
    assert!(geo.lat > 0.0, "expected northern latitude, got {}", geo.lat);
    assert!((geo.lon - -75.0).abs() < 1e-6, "on the central meridian");
}

#[test]
fn round_trip_stays_under_a_meter() {
    // A spread of points across the nominal domain of their zones, both
    // hemispheres, on and off the central meridian.
    let cases = [
        (LatLon::new(-23.5505, -46.6333), "23K"),
        (LatLon::new(-22.9068, -43.1729), "23K"),
        (LatLon::new(-3.1190, -60.0217), "20M"),
        (LatLon::new(-30.0346, -51.2177), "22J"),
        (LatLon::new(4.7110, -74.0721), "18N"),
        (LatLon::new(40.7128, -74.0060), "18T"),
        (LatLon::new(-33.4489, -70.6693), "19H"),
    ];
    for (point, designator) in cases {
        let zone = UtmZone::parse(designator).unwrap();
        let (easting, northing) = forward_utm(point, zone);
        let recovered = to_geodetic(easting, northing, zone).unwrap();
        let (re, rn) = forward_utm(recovered, zone);
        let error = ((re - easting).powi(2) + (rn - northing).powi(2)).sqrt();
        assert!(
            error < 1.0,
            "zone {designator}: round-trip error {error} m for {point:?}"
        );
    }
}

#[test]
fn grid_of_offsets_round_trips() {
    let zone = UtmZone::parse("23K").unwrap();
    for de in [-150_000.0, -50_000.0, 0.0, 50_000.0, 150_000.0] {
        for dn in [-200_000.0, 0.0, 200_000.0] {
            let easting = 500_000.0 + de;
            let northing = 7_400_000.0 + dn;
            let geo = to_geodetic(easting, northing, zone).unwrap();
            let (re, rn) = forward_utm(geo, zone);
            let error = ((re - easting).powi(2) + (rn - northing).powi(2)).sqrt();
            assert!(error < 1.0, "({easting}, {northing}): error {error} m");
        }
    }
}
