// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

//! Property tests over the continuous domains of the geometry crate.

use proptest::prelude::*;
use pylon_geom::catenary::{max_sag_m, sample};
use pylon_geom::{initial_bearing, GeoPoint, LatLon};

prop_compose! {
    /// Positions inside the latitude band where transmission projects live,
    /// away from the poles where the longitude scale degenerates.
    fn arb_latlon()(lat in -60.0f64..60.0, lon in -179.0f64..179.0) -> LatLon {
        LatLon::new(lat, lon)
    }
}

prop_compose! {
    /// Tower-scale anchor points: up to ~0.02 degrees (~2 km) apart.
    fn arb_span()(
        lat in -60.0f64..60.0,
        lon in -179.0f64..179.0,
        dlat in -0.02f64..0.02,
        dlon in -0.02f64..0.02,
        alt_a in 0.0f64..120.0,
        alt_b in 0.0f64..120.0,
    ) -> (GeoPoint, GeoPoint) {
        (
            GeoPoint::new(lon, lat, alt_a),
            GeoPoint::new(lon + dlon, lat + dlat, alt_b),
        )
    }
}

proptest! {
    #[test]
    fn bearing_is_always_in_domain(a in arb_latlon(), b in arb_latlon()) {
        let bearing = initial_bearing(a, b);
        prop_assert!((0.0..360.0).contains(&bearing), "bearing = {bearing}");
    }

    #[test]
    fn short_span_bearings_are_reciprocal(
        a in arb_latlon(),
        dlat in -0.01f64..0.01,
        dlon in -0.01f64..0.01,
    ) {
        prop_assume!(dlat.abs() > 1e-6 || dlon.abs() > 1e-6);
        let b = LatLon::new(a.lat + dlat, a.lon + dlon);
        let forward = initial_bearing(a, b);
        let back = initial_bearing(b, a);
        let diff = (forward - back).rem_euclid(360.0);
        prop_assert!((diff - 180.0).abs() < 0.05, "diff = {diff}");
    }

    #[test]
    fn catenary_endpoints_are_exact(
        (start, end) in arb_span(),
        tension in 1.0f64..50_000.0,
        segments in 1usize..200,
    ) {
        let points = sample(start, end, tension, segments);
        prop_assert_eq!(points[0], start);
        prop_assert_eq!(*points.last().unwrap(), end);
    }

    #[test]
    fn catenary_length_matches_segments(
        (start, end) in arb_span(),
        tension in 1.0f64..50_000.0,
        segments in 1usize..200,
    ) {
        prop_assume!(start.horizontal() != end.horizontal());
        let points = sample(start, end, tension, segments);
        prop_assert_eq!(points.len(), segments + 1);
    }

    #[test]
    fn more_tension_never_adds_sag(
        (start, end) in arb_span(),
        tension in 200.0f64..20_000.0,
    ) {
        prop_assume!(start.horizontal() != end.horizontal());
        let slack = max_sag_m(&sample(start, end, tension, 40));
        let taut = max_sag_m(&sample(start, end, tension * 2.0, 40));
        prop_assert!(taut <= slack + 1e-9, "taut {taut} > slack {slack}");
    }

    #[test]
    fn sampled_altitudes_stay_finite(
        (start, end) in arb_span(),
        tension in 10.0f64..50_000.0,
        segments in 1usize..100,
    ) {
        let points = sample(start, end, tension, segments);
        prop_assert!(points.iter().all(|p| p.alt.is_finite()));
    }

    #[test]
    fn degenerate_span_collapses_to_two_points(
        p in arb_span().prop_map(|(a, _)| a),
        tension in 0.0f64..50_000.0,
        segments in 0usize..100,
    ) {
        let points = sample(p, p, tension, segments);
        prop_assert_eq!(points, vec![p, p]);
    }
}
