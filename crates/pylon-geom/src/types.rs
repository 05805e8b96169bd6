// SPDX-License-Identifier: Apache-2.0
//! Foundational geographic types shared across the workspace.

/// A geographic position on the WGS84 ellipsoid, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    /// Latitude in degrees, positive north. Valid domain `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, positive east. Valid domain `[-180, 180]`.
    pub lon: f64,
}

impl LatLon {
    /// Construct a position from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A geographic position with altitude: degrees horizontally, meters vertically.
///
/// `alt` is height above the terrain datum the backend uses, not above the
/// ellipsoid; the renderer consumes it unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Altitude in meters.
    pub alt: f64,
}

impl GeoPoint {
    /// Construct a point from longitude, latitude (degrees) and altitude (meters).
    pub fn new(lon: f64, lat: f64, alt: f64) -> Self {
        Self { lon, lat, alt }
    }

    /// The horizontal component of this point.
    pub fn horizontal(&self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
