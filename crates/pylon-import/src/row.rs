// SPDX-License-Identifier: Apache-2.0
//! Per-row mapping into tower records.

use csv::StringRecord;
use pylon_geom::zone::default_zone_for_region;
use pylon_geom::{to_geodetic, ConversionError, GeoPoint, UtmZone};
use pylon_model::{Rgba, StructureKind, Tower, TowerId};
use thiserror::Error;

use crate::header::ColumnMap;
use crate::ImportOptions;

/// Height assumed for rows without a height column, matching the authored
/// height of the base tower asset.
const DEFAULT_HEIGHT_M: f64 = 30.0;

/// Why a row was skipped. Never fatal to the import.
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum SkipReason {
    /// Neither a code nor a tower label — nothing to identify the row by.
    #[error("missing both code and tower label")]
    MissingIdentity,
    /// No usable coordinate pair in the row.
    #[error("missing coordinates")]
    MissingCoordinates,
    /// A numeric cell failed to parse (after decimal normalization).
    #[error("unparseable number in column {0}")]
    BadNumber(&'static str),
    /// UTM row with no zone anywhere: row, options, or region table.
    #[error("no UTM zone available")]
    NoZone,
    /// The UTM → geodetic conversion rejected the row.
    #[error("{0}")]
    Conversion(#[from] ConversionError),
}

/// Map one record into a tower, or say why it must be skipped.
pub(crate) fn map_row(
    record: &StringRecord,
    columns: &ColumnMap,
    options: &ImportOptions,
    ordinal: usize,
) -> Result<Tower, SkipReason> {
    let code_cell = cell(record, columns.code);
    let label_cell = cell(record, columns.label);
    if code_cell.is_none() && label_cell.is_none() {
        return Err(SkipReason::MissingIdentity);
    }

    let code = match code_cell {
        Some(raw) => parse_integer(raw).ok_or(SkipReason::BadNumber("code"))?,
        None => u32::try_from(ordinal + 1).unwrap_or(u32::MAX),
    };
    let label = label_cell.map_or_else(|| code.to_string(), str::to_owned);

    let altitude = match cell(record, columns.altitude) {
        Some(raw) => parse_decimal(raw).ok_or(SkipReason::BadNumber("altitude"))?,
        None => 0.0,
    };
    let position = resolve_position(record, columns, options, altitude)?;

    let height_m = match cell(record, columns.height) {
        Some(raw) => parse_decimal(raw).ok_or(SkipReason::BadNumber("height"))?,
        None => DEFAULT_HEIGHT_M,
    };
    let deflection_deg = match cell(record, columns.deflection) {
        Some(raw) => parse_decimal(raw).ok_or(SkipReason::BadNumber("deflection"))?,
        None => 0.0,
    };

    let kind = match cell(record, columns.kind) {
        Some(s) if s.eq_ignore_ascii_case("anchor") => StructureKind::Anchor,
        Some(s) if s.eq_ignore_ascii_case("terminal") => StructureKind::Terminal,
        Some(s) if s.eq_ignore_ascii_case("transposition") => StructureKind::Transposition,
        _ => StructureKind::Suspension,
    };
    let color = cell(record, columns.color)
        .and_then(Rgba::from_hex)
        .unwrap_or_default();
    let hidden = cell(record, columns.hidden).is_some_and(|s| {
        matches!(
            s.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "sim" | "x"
        )
    });

    Ok(Tower {
        id: TowerId(ordinal as u64 + 1),
        code,
        label,
        position,
        height_m,
        deflection_deg,
        kind,
        color,
        hidden,
    })
}

/// A trimmed, non-empty cell at `index`, if any.
fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Pick geodetic columns when present, otherwise convert UTM.
fn resolve_position(
    record: &StringRecord,
    columns: &ColumnMap,
    options: &ImportOptions,
    altitude: f64,
) -> Result<GeoPoint, SkipReason> {
    if let (Some(lat_raw), Some(lon_raw)) = (cell(record, columns.lat), cell(record, columns.lon)) {
        let lat = parse_decimal(lat_raw).ok_or(SkipReason::BadNumber("latitude"))?;
        let lon = parse_decimal(lon_raw).ok_or(SkipReason::BadNumber("longitude"))?;
        return Ok(GeoPoint::new(lon, lat, altitude));
    }

    let (Some(east_raw), Some(north_raw)) = (cell(record, columns.east), cell(record, columns.north))
    else {
        return Err(SkipReason::MissingCoordinates);
    };
    let easting = parse_decimal(east_raw).ok_or(SkipReason::BadNumber("easting"))?;
    let northing = parse_decimal(north_raw).ok_or(SkipReason::BadNumber("northing"))?;

    let zone = resolve_zone(cell(record, columns.zone), options)?;
    let geo = to_geodetic(easting, northing, zone)?;
    Ok(GeoPoint::new(geo.lon, geo.lat, altitude))
}

/// Zone precedence: row cell, then import options, then the region table.
fn resolve_zone(row_zone: Option<&str>, options: &ImportOptions) -> Result<UtmZone, SkipReason> {
    let band = options.fallback_band.unwrap_or('K');
    if let Some(raw) = row_zone {
        // A bare zone number ("23") takes the fallback band; anything with
        // a band letter must parse fully.
        if raw.chars().all(|c| c.is_ascii_digit()) {
            let number: u8 = raw.parse().map_err(|_| SkipReason::BadNumber("zone"))?;
            return Ok(UtmZone::new(number, band)?);
        }
        return Ok(UtmZone::parse(raw)?);
    }
    if let Some(zone) = options.zone {
        return Ok(zone);
    }
    if let Some(region) = options.region.as_deref() {
        if let Some(number) = default_zone_for_region(region) {
            return Ok(UtmZone::new(number, band)?);
        }
    }
    Err(SkipReason::NoZone)
}

/// Parse a decimal cell, accepting comma or dot separators.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

/// Parse an integer cell, tolerating a decimal tail ("15,0").
fn parse_integer(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse() {
        return Some(n);
    }
    let value = parse_decimal(raw)?;
    if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decimal_separators_both_parse() {
        assert_eq!(parse_decimal("7394520,5"), Some(7_394_520.5));
        assert_eq!(parse_decimal("7394520.5"), Some(7_394_520.5));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn integer_cells_tolerate_decimal_tails() {
        assert_eq!(parse_integer("15"), Some(15));
        assert_eq!(parse_integer("15,0"), Some(15));
        assert_eq!(parse_integer("15,5"), None);
        assert_eq!(parse_integer("-2"), None);
    }

    #[test]
    fn zone_precedence_row_options_region() {
        let options = ImportOptions {
            zone: Some(UtmZone::new(21, 'J').unwrap()),
            region: Some("SP".to_owned()),
            fallback_band: None,
        };
        // Row wins.
        assert_eq!(
            resolve_zone(Some("24L"), &options).unwrap(),
            UtmZone::new(24, 'L').unwrap()
        );
        // Bare number takes the fallback band.
        assert_eq!(
            resolve_zone(Some("24"), &options).unwrap(),
            UtmZone::new(24, 'K').unwrap()
        );
        // No row zone: options win over region.
        assert_eq!(
            resolve_zone(None, &options).unwrap(),
            UtmZone::new(21, 'J').unwrap()
        );
        // Region table is the last resort.
        let region_only = ImportOptions {
            zone: None,
            region: Some("SP".to_owned()),
            fallback_band: None,
        };
        assert_eq!(
            resolve_zone(None, &region_only).unwrap(),
            UtmZone::new(23, 'K').unwrap()
        );
        // Nothing anywhere.
        assert_eq!(
            resolve_zone(None, &ImportOptions::default()),
            Err(SkipReason::NoZone)
        );
    }
}
