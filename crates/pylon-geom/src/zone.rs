// SPDX-License-Identifier: Apache-2.0
//! Default UTM zone lookup by first-level administrative region.
//!
//! Survey spreadsheets from the field frequently omit the UTM zone because
//! "everyone on the job knows it". This table supplies a fallback zone per
//! Brazilian federative unit so such rows can still be imported.
//!
//! This is a heuristic approximation, not a projection: the zone is the one
//! covering the state capital, and several large states (AM, PA, MT, BA, …)
//! genuinely span two or more zones. Rows that carry an explicit zone always
//! win; see `pylon-import`.

/// Default UTM zone number per federative-unit code, keyed to the capital.
const DEFAULT_ZONES: &[(&str, u8)] = &[
    ("AC", 19),
    ("AL", 25),
    ("AM", 20),
    ("AP", 22),
    ("BA", 24),
    ("CE", 24),
    ("DF", 23),
    ("ES", 24),
    ("GO", 22),
    ("MA", 23),
    ("MG", 23),
    ("MS", 21),
    ("MT", 21),
    ("PA", 22),
    ("PB", 25),
    ("PE", 25),
    ("PI", 23),
    ("PR", 22),
    ("RJ", 23),
    ("RN", 25),
    ("RO", 20),
    ("RR", 20),
    ("RS", 22),
    ("SC", 22),
    ("SE", 24),
    ("SP", 23),
    ("TO", 22),
];

/// Look up the default UTM zone number for a region code (e.g. `"SP"`).
///
/// Matching is case-insensitive. Returns `None` for unknown codes — the
/// caller decides whether that skips the row or aborts the import.
pub fn default_zone_for_region(code: &str) -> Option<u8> {
    let code = code.trim();
    DEFAULT_ZONES
        .iter()
        .find(|(region, _)| region.eq_ignore_ascii_case(code))
        .map(|&(_, zone)| zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_regions_resolve() {
        assert_eq!(default_zone_for_region("SP"), Some(23));
        assert_eq!(default_zone_for_region("ba"), Some(24));
        assert_eq!(default_zone_for_region(" RS "), Some(22));
    }

    #[test]
    fn unknown_region_is_none() {
        assert_eq!(default_zone_for_region("XX"), None);
        assert_eq!(default_zone_for_region(""), None);
    }
}
