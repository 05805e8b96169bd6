// SPDX-License-Identifier: Apache-2.0
//! Pylon developer CLI.
//!
//! `pylon import` turns a survey CSV into a project snapshot, `pylon
//! compose` turns a snapshot into render layers plus their input digest,
//! and `pylon inspect` prints a human-readable tower table. The CLI is a
//! host like any other: it drives the same crates the application embeds.

// A CLI's job is to print.
#![allow(clippy::print_stdout)]

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use pylon_compose::{compose, input_digest, synthesize_spans, tower_bearings, ComposeOptions};
use pylon_geom::UtmZone;
use pylon_import::{import_towers, ImportOptions};
use pylon_model::{CableSettings, ProjectId};
use pylon_scene_port::RenderLayer;
use pylon_store::CacheSnapshot;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(name = "pylon", version, about = "Transmission-line map tooling")]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a survey CSV into a project snapshot.
    Import {
        /// CSV file to read.
        #[clap(long)]
        file: PathBuf,
        /// Project id to stamp on the snapshot.
        #[clap(long)]
        project: u64,
        /// UTM zone fallback for rows without one (e.g. "23K").
        #[clap(long)]
        zone: Option<String>,
        /// Region code fallback for the zone table (e.g. "SP").
        #[clap(long)]
        region: Option<String>,
        /// Write the snapshot here instead of stdout.
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Compose render layers from a snapshot.
    Compose {
        /// Snapshot JSON produced by `import` (or cached by the app).
        #[clap(long)]
        snapshot: PathBuf,
        /// Catenary samples per cable path.
        #[clap(long, default_value_t = 40)]
        segments: usize,
        /// Write the layers here instead of stdout.
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Print a tower table for a snapshot.
    Inspect {
        /// Snapshot JSON to inspect.
        #[clap(long)]
        snapshot: PathBuf,
    },
}

/// Layers plus the digest a host would compare before recomposing.
#[derive(Serialize)]
struct ComposeOutput {
    digest: String,
    layers: Vec<RenderLayer>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match Args::parse().command {
        Command::Import {
            file,
            project,
            zone,
            region,
            out,
        } => run_import(&file, ProjectId(project), zone.as_deref(), region, out.as_deref()),
        Command::Compose {
            snapshot,
            segments,
            out,
        } => run_compose(&snapshot, segments, out.as_deref()),
        Command::Inspect { snapshot } => run_inspect(&snapshot),
    }
}

fn run_import(
    file: &std::path::Path,
    project: ProjectId,
    zone: Option<&str>,
    region: Option<String>,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let zone = zone.map(UtmZone::parse).transpose()?;
    let options = ImportOptions {
        zone,
        region,
        fallback_band: None,
    };
    let input = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let outcome = import_towers(input, &options)?;
    info!(
        imported = outcome.report.imported,
        skipped = outcome.report.skipped,
        "import finished"
    );

    let snapshot = CacheSnapshot::captured_now(
        project,
        outcome.towers,
        None,
        CableSettings::default(),
    );
    write_json(&snapshot, out)
}

fn run_compose(snapshot: &std::path::Path, segments: usize, out: Option<&std::path::Path>) -> Result<()> {
    let snapshot = read_snapshot(snapshot)?;
    let options = ComposeOptions {
        segments,
        ..ComposeOptions::default()
    };
    let layers = compose(
        &snapshot.towers,
        snapshot.effective_spans(),
        &snapshot.settings,
        &options,
    );
    let digest = input_digest(
        &snapshot.towers,
        snapshot.effective_spans(),
        &snapshot.settings,
    );
    info!(%digest, layers = layers.len(), "composed");
    write_json(
        &ComposeOutput {
            digest: digest.to_string(),
            layers,
        },
        out,
    )
}

fn run_inspect(path: &std::path::Path) -> Result<()> {
    let snapshot = read_snapshot(path)?;
    let spans_owned;
    let spans: &[_] = if snapshot.effective_spans().is_empty() {
        spans_owned = synthesize_spans(&snapshot.towers);
        spans_owned.as_slice()
    } else {
        snapshot.effective_spans()
    };
    let bearings = tower_bearings(&snapshot.towers, spans);

    let mut table = Table::new();
    table.set_header(vec!["code", "label", "kind", "lat", "lon", "height m", "bearing"]);
    for tower in &snapshot.towers {
        let bearing = bearings.get(&tower.id).copied().unwrap_or(0.0);
        table.add_row(vec![
            tower.code.to_string(),
            tower.label.clone(),
            format!("{:?}", tower.kind).to_lowercase(),
            format!("{:.6}", tower.position.lat),
            format!("{:.6}", tower.position.lon),
            format!("{:.1}", tower.height_m),
            format!("{bearing:.1}°"),
        ]);
    }
    println!("{table}");
    println!(
        "{} towers, {} spans, captured at {} ms",
        snapshot.towers.len(),
        spans.len(),
        snapshot.captured_at_ms
    );
    Ok(())
}

fn read_snapshot(path: &std::path::Path) -> Result<CacheSnapshot> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("decoding {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, out: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
