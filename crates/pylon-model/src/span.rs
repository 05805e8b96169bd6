// SPDX-License-Identifier: Apache-2.0
//! Span records: the cable-bearing connection between two towers.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Rgba, TowerId};

/// An ordered tower-to-tower connection with per-span overrides.
///
/// Spans are usually derived, not persisted: when a snapshot carries no
/// explicit spans the composer synthesizes a sequential chain from the tower
/// labels. Explicit spans exist for projects whose topology was surveyed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Tower the cables leave from.
    pub start: TowerId,
    /// Tower the cables arrive at.
    pub end: TowerId,
    /// Per-span cable tension override; `None` uses the project baseline.
    #[serde(default)]
    pub tension: Option<f64>,
    /// Per-span conductor phase count override.
    #[serde(default)]
    pub phases: Option<u8>,
    /// Per-span cable color override.
    #[serde(default)]
    pub color: Option<Rgba>,
}

impl Span {
    /// A plain span with no overrides.
    pub fn between(start: TowerId, end: TowerId) -> Self {
        Self {
            start,
            end,
            tension: None,
            phases: None,
            color: None,
        }
    }

    /// Check the span invariant: `start != end`.
    ///
    /// Referential integrity (both ids present in the snapshot) can only be
    /// checked against a tower set and is enforced by the composer.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.start == self.end {
            return Err(ModelError::SelfSpan(self.start));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_towers_are_valid() {
        assert!(Span::between(TowerId(1), TowerId(2)).validate().is_ok());
    }

    #[test]
    fn self_span_is_rejected() {
        assert!(matches!(
            Span::between(TowerId(3), TowerId(3)).validate(),
            Err(ModelError::SelfSpan(TowerId(3)))
        ));
    }
}
