// SPDX-License-Identifier: Apache-2.0
//! Header normalization and synonym matching.

use csv::StringRecord;

/// Normalize a header cell: lowercase, Portuguese diacritics folded to
/// ASCII, every other non-alphanumeric run becomes a single underscore,
/// leading/trailing underscores dropped.
///
/// `"Coord. E (UTM)"` → `"coord_e_utm"`, `"Código"` → `"codigo"`.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        let ch = fold_diacritic(ch);
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Fold the accented characters that show up in Portuguese survey headers.
fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

const CODE: &[&str] = &["code", "codigo", "torre_id", "id"];
const LABEL: &[&str] = &["tower", "tower_number", "torre", "numero", "num", "label"];
const LAT: &[&str] = &["lat", "latitude"];
const LON: &[&str] = &["lng", "lon", "longitude"];
const EAST: &[&str] = &["east", "este", "easting", "utm_e", "coord_e", "coord_e_utm", "x"];
const NORTH: &[&str] = &["north", "norte", "northing", "utm_n", "coord_n", "coord_n_utm", "y"];
const ZONE: &[&str] = &["zone", "zona", "fuso"];
const HEIGHT: &[&str] = &["height", "altura"];
const ALTITUDE: &[&str] = &["altitude", "elevation", "elevacao", "cota"];
const DEFLECTION: &[&str] = &["deflection", "deflexao"];
const KIND: &[&str] = &["type", "tipo", "structure", "estrutura"];
const COLOR: &[&str] = &["color", "cor"];
const HIDDEN: &[&str] = &["hidden", "oculta", "oculto"];

/// Column indices resolved from a normalized header row.
#[derive(Clone, Copy, Debug, Default)]
#[allow(missing_docs)]
pub struct ColumnMap {
    pub code: Option<usize>,
    pub label: Option<usize>,
    pub lat: Option<usize>,
    pub lon: Option<usize>,
    pub east: Option<usize>,
    pub north: Option<usize>,
    pub zone: Option<usize>,
    pub height: Option<usize>,
    pub altitude: Option<usize>,
    pub deflection: Option<usize>,
    pub kind: Option<usize>,
    pub color: Option<usize>,
    pub hidden: Option<usize>,
}

impl ColumnMap {
    /// Match each header cell against the synonym tables. First match per
    /// field wins; unrecognized columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut map = Self::default();
        for (index, raw) in headers.iter().enumerate() {
            let name = normalize_header(raw);
            let slot = |current: &mut Option<usize>, synonyms: &[&str]| {
                if current.is_none() && synonyms.contains(&name.as_str()) {
                    *current = Some(index);
                }
            };
            slot(&mut map.code, CODE);
            slot(&mut map.label, LABEL);
            slot(&mut map.lat, LAT);
            slot(&mut map.lon, LON);
            slot(&mut map.east, EAST);
            slot(&mut map.north, NORTH);
            slot(&mut map.zone, ZONE);
            slot(&mut map.height, HEIGHT);
            slot(&mut map.altitude, ALTITUDE);
            slot(&mut map.deflection, DEFLECTION);
            slot(&mut map.kind, KIND);
            slot(&mut map.color, COLOR);
            slot(&mut map.hidden, HIDDEN);
        }
        map
    }

    /// True when the header carries either geodetic or UTM coordinates.
    pub fn has_coordinates(&self) -> bool {
        (self.lat.is_some() && self.lon.is_some())
            || (self.east.is_some() && self.north.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_flattens_punctuation_and_case() {
        assert_eq!(normalize_header("Coord. E (UTM)"), "coord_e_utm");
        assert_eq!(normalize_header("  Torre ID "), "torre_id");
        assert_eq!(normalize_header("ALTURA"), "altura");
        assert_eq!(normalize_header("n°"), "n");
        assert_eq!(normalize_header("Código"), "codigo");
        assert_eq!(normalize_header("Deflexão"), "deflexao");
    }

    #[test]
    fn portuguese_and_english_headers_both_resolve() {
        let headers = StringRecord::from(vec!["Código", "Torre", "Este", "Norte", "Zona"]);
        let map = ColumnMap::from_headers(&headers);
        assert_eq!(map.code, Some(0));
        assert_eq!(map.label, Some(1));
        assert_eq!(map.east, Some(2));
        assert_eq!(map.north, Some(3));
        assert_eq!(map.zone, Some(4));
        assert!(map.has_coordinates());
    }

    #[test]
    fn geodetic_headers_count_as_coordinates() {
        let headers = StringRecord::from(vec!["code", "tower", "Latitude", "Longitude"]);
        let map = ColumnMap::from_headers(&headers);
        assert!(map.has_coordinates());
        assert!(map.east.is_none());
    }

    #[test]
    fn first_synonym_match_wins() {
        let headers = StringRecord::from(vec!["code", "codigo"]);
        let map = ColumnMap::from_headers(&headers);
        assert_eq!(map.code, Some(0));
    }

    #[test]
    fn unrelated_headers_resolve_nothing() {
        let headers = StringRecord::from(vec!["foo", "bar"]);
        let map = ColumnMap::from_headers(&headers);
        assert!(!map.has_coordinates());
        assert!(map.code.is_none());
    }
}
