// SPDX-License-Identifier: Apache-2.0
//! Content digest over composition inputs.
//!
//! Hosts call [`input_digest`] before composing: if the digest matches the
//! previous pass, the layer set cannot have changed and the pass can be
//! skipped. The digest is a BLAKE3 hash over a canonical byte stream.
//!
//! Determinism contract:
//! - Towers are encoded in ascending `TowerId` order; spans in input order
//!   (span order is semantic — it drives the branch tie-break).
//! - Floats are canonicalized (see `pylon-scene-port::canonicalize_f64`)
//!   and encoded as little-endian IEEE-754 bits.
//! - Strings and lists are prefixed with an 8-byte little-endian length.
//! - Changing any of this is a breaking change for hosts that persist
//!   digests across sessions.

use blake3::Hasher;
use pylon_model::{Anchor, CableSettings, Span, Tower};
use pylon_scene_port::canonicalize_f64;

/// A 32-byte BLAKE3 digest over composition inputs.
///
/// Thin newtype over `[u8; 32]`; the `Display` impl renders lowercase hex
/// for logging and CLI output.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct InputDigest(pub [u8; 32]);

impl InputDigest {
    /// View the digest as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for InputDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Compute the content digest of one composition input set.
///
/// Same inputs → same digest, across processes and architectures. Floats
/// are canonicalized first, so sub-centimeter coordinate noise does not
/// invalidate a cached pass.
pub fn input_digest(towers: &[Tower], spans: &[Span], settings: &CableSettings) -> InputDigest {
    let mut hasher = Hasher::new();
    hasher.update(b"pylon-compose-inputs-v1");

    let mut ordered: Vec<&Tower> = towers.iter().collect();
    ordered.sort_by_key(|t| t.id);
    write_len(&mut hasher, ordered.len());
    for tower in ordered {
        write_tower(&mut hasher, tower);
    }

    write_len(&mut hasher, spans.len());
    for span in spans {
        write_span(&mut hasher, span);
    }

    write_settings(&mut hasher, settings);

    InputDigest(*hasher.finalize().as_bytes())
}

fn write_len(hasher: &mut Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn write_f64(hasher: &mut Hasher, value: f64) {
    hasher.update(&canonicalize_f64(value).to_bits().to_le_bytes());
}

fn write_str(hasher: &mut Hasher, text: &str) {
    write_len(hasher, text.len());
    hasher.update(text.as_bytes());
}

fn write_tower(hasher: &mut Hasher, tower: &Tower) {
    hasher.update(&tower.id.0.to_le_bytes());
    hasher.update(&tower.code.to_le_bytes());
    write_str(hasher, &tower.label);
    write_f64(hasher, tower.position.lon);
    write_f64(hasher, tower.position.lat);
    write_f64(hasher, tower.position.alt);
    write_f64(hasher, tower.height_m);
    write_f64(hasher, tower.deflection_deg);
    hasher.update(&[tower.kind as u8, u8::from(tower.hidden)]);
    hasher.update(&tower.color.0);
}

fn write_span(hasher: &mut Hasher, span: &Span) {
    hasher.update(&span.start.0.to_le_bytes());
    hasher.update(&span.end.0.to_le_bytes());
    if let Some(tension) = span.tension {
        hasher.update(&[1]);
        write_f64(hasher, tension);
    } else {
        hasher.update(&[0]);
    }
    if let Some(phases) = span.phases {
        hasher.update(&[1, phases]);
    } else {
        hasher.update(&[0]);
    }
    if let Some(color) = span.color {
        hasher.update(&[1]);
        hasher.update(&color.0);
    } else {
        hasher.update(&[0]);
    }
}

fn write_settings(hasher: &mut Hasher, settings: &CableSettings) {
    write_f64(hasher, settings.tension);
    write_f64(hasher, settings.tower_vertical_offset_m);
    write_f64(hasher, settings.global_opacity);
    write_len(hasher, settings.anchors.len());
    for anchor in &settings.anchors {
        write_anchor(hasher, anchor);
    }
}

fn write_anchor(hasher: &mut Hasher, anchor: &Anchor) {
    write_str(hasher, &anchor.id);
    write_f64(hasher, anchor.horizontal_offset_m);
    write_f64(hasher, anchor.vertical_ratio);
    hasher.update(&[u8::from(anchor.enabled)]);
    hasher.update(&anchor.color.0);
    hasher.update(&anchor.width.to_le_bytes());
}
