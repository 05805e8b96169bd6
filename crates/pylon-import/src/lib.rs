// SPDX-License-Identifier: Apache-2.0
//! Survey spreadsheet import.
//!
//! Field crews deliver tower inventories as spreadsheets exported to CSV,
//! with headers in whatever language and convention the surveyor used.
//! This crate normalizes the header row, matches each column against a
//! synonym table, and maps rows into [`Tower`] records — converting UTM
//! coordinates to geodetic on the way in (the only place in the system
//! where that conversion happens).
//!
//! Row policy, in the order applied:
//! - A row missing both a code and a tower label is skipped silently
//!   (counted, logged at debug).
//! - Numeric cells accept comma or dot decimal separators.
//! - A row whose coordinates cannot be converted (bad zone, malformed
//!   numbers) is skipped and counted — never imported with guessed values.
//!
//! The aggregate result reports imported vs. skipped counts so the caller
//! can surface "imported 132 of 140 rows" to the operator.

mod header;
mod row;

pub use header::{normalize_header, ColumnMap};

use std::io::Read;

use pylon_geom::UtmZone;
use pylon_model::Tower;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort an import wholesale.
///
/// Per-row problems never abort; they are counted in [`ImportReport`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read or parsed as CSV at all.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// The header row has neither geodetic nor UTM coordinate columns.
    #[error("[IMPORT_NO_COORDINATES] header has no lat/lng and no easting/northing columns")]
    NoCoordinateColumns,
}

/// Import tuning and fallbacks.
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    /// Zone to use when a row has no zone column, e.g. parsed from a CLI
    /// `--zone 23K` flag.
    pub zone: Option<UtmZone>,
    /// Region code (federative unit) used to look up a default zone number
    /// when neither the row nor `zone` provides one.
    pub region: Option<String>,
    /// Latitude band assumed when only a zone number is known (rows like
    /// `"23"`, or the region-table fallback). Defaults to `'K'` — the
    /// band covering the bulk of Brazilian transmission projects. This is
    /// a heuristic, matching the region table's own precision.
    pub fallback_band: Option<char>,
}

/// Counts reported after an import pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows mapped into towers.
    pub imported: usize,
    /// Rows skipped (missing identity or failed conversion).
    pub skipped: usize,
}

/// The outcome of one import pass.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Towers in file order, with sequential ids.
    pub towers: Vec<Tower>,
    /// Imported/skipped accounting.
    pub report: ImportReport,
}

/// Import towers from CSV data.
///
/// The header row is normalized and matched against the synonym table in
/// [`ColumnMap`]; see the module docs for the row policy.
pub fn import_towers<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> Result<ImportOutcome, ImportError> {
    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv.headers()?);
    if !columns.has_coordinates() {
        return Err(ImportError::NoCoordinateColumns);
    }

    let mut towers = Vec::new();
    let mut report = ImportReport::default();
    for (index, record) in csv.records().enumerate() {
        let record = record?;
        let line = index + 2; // header is line 1
        match row::map_row(&record, &columns, options, towers.len()) {
            Ok(tower) => {
                towers.push(tower);
                report.imported += 1;
            }
            Err(reason) => {
                debug!(line, %reason, "row skipped");
                report.skipped += 1;
            }
        }
    }

    info!(
        imported = report.imported,
        skipped = report.skipped,
        "import finished"
    );
    Ok(ImportOutcome { towers, report })
}
