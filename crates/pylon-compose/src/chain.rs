// SPDX-License-Identifier: Apache-2.0
//! Sequential span-chain synthesis.
//!
//! Most projects never persist spans: the line is a chain, and the chain
//! order is embedded in the tower labels ("15", "15/1", "16", …). When a
//! snapshot arrives without explicit spans the composer reconstructs that
//! chain here.

use pylon_model::{Span, Tower};

/// Synthesize the sequential chain for a snapshot without explicit spans.
///
/// Towers are sorted by [`Tower::sequence_key`] — the numeric component of
/// the display label, supporting `"N/M"` compound numbering, falling back
/// to the sequence code — and each tower is connected to its immediate
/// successor. Ties sort by id so the result stays deterministic regardless
/// of input order. The synthesized spans carry no overrides; the project
/// baseline applies.
pub fn synthesize_spans<'a, I>(towers: I) -> Vec<Span>
where
    I: IntoIterator<Item = &'a Tower>,
{
    let mut ordered: Vec<&Tower> = towers.into_iter().collect();
    ordered.sort_by_key(|t| (t.sequence_key(), t.id));

    ordered
        .windows(2)
        .map(|pair| Span::between(pair[0].id, pair[1].id))
        .collect()
}
