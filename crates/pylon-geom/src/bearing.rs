// SPDX-License-Identifier: Apache-2.0
//! Great-circle initial bearing.

use crate::types::LatLon;

/// Initial bearing from `from` toward `to`, degrees clockwise from north,
/// normalized to `[0, 360)`.
///
/// Standard spherical formula:
/// `atan2(sin Δλ · cos φ2, cos φ1 · sin φ2 − sin φ1 · cos φ2 · cos Δλ)`.
/// Coincident points yield 0.
pub fn initial_bearing(from: LatLon, to: LatLon) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let degrees = y.atan2(x).to_degrees();
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn cardinal_directions_on_the_equator() {
        let origin = LatLon::new(0.0, 0.0);
        assert!((initial_bearing(origin, LatLon::new(1.0, 0.0)) - 0.0).abs() < EPS);
        assert!((initial_bearing(origin, LatLon::new(0.0, 1.0)) - 90.0).abs() < EPS);
        assert!((initial_bearing(origin, LatLon::new(-1.0, 0.0)) - 180.0).abs() < EPS);
        assert!((initial_bearing(origin, LatLon::new(0.0, -1.0)) - 270.0).abs() < EPS);
    }

    #[test]
    fn coincident_points_default_north() {
        let p = LatLon::new(-23.55, -46.63);
        assert!((initial_bearing(p, p)).abs() < EPS);
    }

    #[test]
    fn output_is_always_normalized() {
        let a = LatLon::new(-23.5505, -46.6333);
        let b = LatLon::new(-23.5532, -46.6301);
        let forward = initial_bearing(a, b);
        let back = initial_bearing(b, a);
        assert!((0.0..360.0).contains(&forward));
        assert!((0.0..360.0).contains(&back));
        // Reciprocal bearings differ by 180 degrees over a short span.
        let diff = (forward - back).rem_euclid(360.0);
        assert!((diff - 180.0).abs() < 0.01, "diff = {diff}");
    }
}
