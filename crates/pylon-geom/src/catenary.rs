// SPDX-License-Identifier: Apache-2.0
//! Catenary cable sampling.
//!
//! A conductor hanging between two towers follows a hyperbolic-cosine
//! catenary. [`sample`] produces a polyline approximation between two
//! geographic anchor points: `segments + 1` points whose first and last
//! entries are exactly the inputs.
//!
//! The `tension` parameter is a unitless visual sag knob, not a calibrated
//! horizontal force — larger values pull the curve toward the chord.
//!
//! Known approximation: points are evenly spaced in the parametric fraction
//! `t = i/segments`, not in arc length, so sampling is denser where the
//! curve is flatter in projection. Renderers tessellate the path anyway, so
//! this has not mattered in practice.

use crate::local::horizontal_distance_m;
use crate::types::GeoPoint;

/// Tension values below this threshold are treated as degenerate input.
pub const MIN_TENSION: f64 = 0.1;
/// Replacement tension applied when the input is degenerate, keeping the
/// `cosh` argument well away from overflow.
pub const FALLBACK_TENSION: f64 = 1000.0;

/// Sample a catenary between `start` and `end`.
///
/// Returns `segments + 1` points; the endpoints are bit-exact copies of the
/// inputs. Degenerate cases are normalized rather than failing:
///
/// - Coincident anchors (zero horizontal span) return `[start, end]`.
/// - `segments == 0` is treated as 1.
/// - `tension < MIN_TENSION` is replaced by [`FALLBACK_TENSION`].
///
/// Must be re-invoked whenever any of `start`, `end`, or `tension` changes;
/// the output is never patched incrementally.
pub fn sample(start: GeoPoint, end: GeoPoint, tension: f64, segments: usize) -> Vec<GeoPoint> {
    let span = horizontal_distance_m(start.horizontal(), end.horizontal());
    if span == 0.0 {
        return vec![start, end];
    }
    let segments = segments.max(1);
    let tension = if tension < MIN_TENSION {
        FALLBACK_TENSION
    } else {
        tension
    };

    let drop = end.alt - start.alt;
    // Projecting the sag onto the inclined chord: divide by the cosine of
    // the chord's slope angle.
    let slope_cos = drop.atan2(span).cos();
    let cosh_apex = (span / (2.0 * tension)).cosh();

    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    for i in 1..segments {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / segments as f64;
        let x = span * t;
        let sag =
            tension * (cosh_apex - ((span - 2.0 * x) / (2.0 * tension)).cosh()) / slope_cos;
        points.push(GeoPoint {
            lon: start.lon + (end.lon - start.lon) * t,
            lat: start.lat + (end.lat - start.lat) * t,
            alt: start.alt + drop * t - sag,
        });
    }
    points.push(end);
    points
}

/// Maximum deviation of the sampled curve below the straight chord, meters.
///
/// Convenience for tests and sag-clearance checks; recomputes nothing the
/// renderer needs.
pub fn max_sag_m(points: &[GeoPoint]) -> f64 {
    let Some((first, last)) = points.first().zip(points.last()) else {
        return 0.0;
    };
    let n = points.len().saturating_sub(1).max(1);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / n as f64;
            let chord = first.alt + (last.alt - first.alt) * t;
            chord - p.alt
        })
        .fold(0.0, f64::max)
}
