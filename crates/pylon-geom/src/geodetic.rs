// SPDX-License-Identifier: Apache-2.0
//! UTM → WGS84 inverse projection.
//!
//! Closed-form series inverse of the transverse Mercator projection: the
//! meridional arc is inverted through the footpoint latitude (4-term series
//! in `e1`), then second-order correction terms built from the second
//! eccentricity and the two radii of curvature at the footpoint recover
//! latitude and longitude. No iteration — the result is deterministic and
//! O(1) per call.
//!
//! Contract notes:
//! - Inputs and outputs are degrees/meters; all trigonometry is radians
//!   internally.
//! - Northings follow the UTM false-northing convention: bands south of the
//!   equator (letter < `'N'`) carry a 10,000,000 m offset which is removed
//!   before inversion.
//! - A malformed zone string is a [`ConversionError`], never a silent
//!   default. Callers importing tabular data must skip the affected row.

use thiserror::Error;

use crate::types::LatLon;

/// WGS84 semi-major axis in meters.
pub const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const FLATTENING: f64 = 1.0 / 298.257_223_563;
/// UTM central-meridian scale factor.
pub const SCALE_FACTOR: f64 = 0.9996;

const FALSE_EASTING_M: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH_M: f64 = 10_000_000.0;

/// Errors raised while parsing or inverting UTM coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The zone string did not contain a zone number in `1..=60`.
    #[error("[UTM_BAD_ZONE] zone {0:?} does not resolve to an integer 1-60")]
    BadZone(String),
    /// The band letter is outside `C..=X` (I and O are never assigned).
    #[error("[UTM_BAD_BAND] band {0:?} is not a valid UTM latitude band")]
    BadBand(String),
    /// Easting or northing was NaN or infinite.
    #[error("[UTM_NON_FINITE] easting/northing must be finite, got ({easting}, {northing})")]
    NonFinite {
        /// The offending easting value.
        easting: f64,
        /// The offending northing value.
        northing: f64,
    },
}

/// A parsed UTM grid zone: number plus latitude band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtmZone {
    /// Zone number, `1..=60`.
    pub number: u8,
    /// Latitude band letter, `C..=X` excluding `I` and `O`. Uppercase.
    pub band: char,
}

impl UtmZone {
    /// Construct a zone, validating number and band.
    pub fn new(number: u8, band: char) -> Result<Self, ConversionError> {
        if !(1..=60).contains(&number) {
            return Err(ConversionError::BadZone(number.to_string()));
        }
        let band = band.to_ascii_uppercase();
        if !('C'..='X').contains(&band) || band == 'I' || band == 'O' {
            return Err(ConversionError::BadBand(band.to_string()));
        }
        Ok(Self { number, band })
    }

    /// Parse a compact zone designator such as `"23K"`.
    ///
    /// Leading digits form the zone number, the single trailing letter the
    /// band. Whitespace around the designator is tolerated; anything else is
    /// an error.
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        let text = text.trim();
        let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
        let rest = &text[digits.len()..];
        let number: u8 = digits
            .parse()
            .map_err(|_| ConversionError::BadZone(text.to_string()))?;
        let mut letters = rest.chars();
        let band = letters
            .next()
            .ok_or_else(|| ConversionError::BadBand(text.to_string()))?;
        if letters.next().is_some() {
            return Err(ConversionError::BadBand(text.to_string()));
        }
        Self::new(number, band)
    }

    /// True when the band lies south of the equator (letters `C..=M`).
    pub fn is_southern(&self) -> bool {
        self.band < 'N'
    }

    /// Longitude of the zone's central meridian, degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        f64::from(self.number - 1) * 6.0 - 180.0 + 3.0
    }
}

impl std::fmt::Display for UtmZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.band)
    }
}

/// Invert a UTM easting/northing pair to geodetic latitude/longitude.
///
/// Pure function, no I/O. See the module docs for the series used; accuracy
/// within a zone's nominal domain is well under a meter when round-tripped
/// through a forward transverse Mercator projection.
pub fn to_geodetic(easting: f64, northing: f64, zone: UtmZone) -> Result<LatLon, ConversionError> {
    if !easting.is_finite() || !northing.is_finite() {
        return Err(ConversionError::NonFinite { easting, northing });
    }

    // First eccentricity squared and second eccentricity squared.
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);

    let x = easting - FALSE_EASTING_M;
    let y = if zone.is_southern() {
        northing - FALSE_NORTHING_SOUTH_M
    } else {
        northing
    };

    // Meridional arc length, then the footpoint latitude via the 4-term
    // series in e1.
    let arc = y / SCALE_FACTOR;
    let mu = arc
        / (SEMI_MAJOR_AXIS_M
            * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));
    let sqrt_1me2 = (1.0 - e2).sqrt();
    let e1 = (1.0 - sqrt_1me2) / (1.0 + sqrt_1me2);

    let footpoint = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_fp = footpoint.sin();
    let cos_fp = footpoint.cos();
    let tan_fp = footpoint.tan();

    // Curvature at the footpoint: c1 from the second eccentricity, n1 the
    // prime-vertical radius, r1 the meridian radius.
    let c1 = ep2 * cos_fp * cos_fp;
    let t1 = tan_fp * tan_fp;
    let denom = 1.0 - e2 * sin_fp * sin_fp;
    let n1 = SEMI_MAJOR_AXIS_M / denom.sqrt();
    let r1 = SEMI_MAJOR_AXIS_M * (1.0 - e2) / denom.powf(1.5);
    let d = x / (n1 * SCALE_FACTOR);

    let lat_rad = footpoint
        - (n1 * tan_fp / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let lon_rad = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d.powi(5)
            / 120.0)
        / cos_fp;

    Ok(LatLon {
        lat: lat_rad.to_degrees(),
        lon: zone.central_meridian_deg() + lon_rad.to_degrees(),
    })
}
