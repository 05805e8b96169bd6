// SPDX-License-Identifier: Apache-2.0
//! Tower orientation from span topology.
//!
//! Real transmission networks are linear, but the data model permits a
//! tower to have several outgoing spans. The graph is held as an explicit
//! directed multigraph so a future branch-resolution policy is a
//! one-function change; today the first span in input order wins. That
//! tie-break is a recorded open question, not an electrical-engineering
//! rule — see DESIGN.md.

use pylon_geom::initial_bearing;
use pylon_model::{Span, Tower, TowerId};
use rustc_hash::FxHashMap;

/// Directed multigraph over the spans of one snapshot.
///
/// Adjacency lists preserve span input order, which is what makes the
/// first-found tie-break deterministic.
pub struct SpanGraph<'a> {
    outgoing: FxHashMap<TowerId, Vec<&'a Span>>,
    incoming: FxHashMap<TowerId, Vec<&'a Span>>,
}

impl<'a> SpanGraph<'a> {
    /// Index the given spans. Spans failing validation are skipped.
    pub fn build(spans: &'a [Span]) -> Self {
        let mut outgoing: FxHashMap<TowerId, Vec<&'a Span>> = FxHashMap::default();
        let mut incoming: FxHashMap<TowerId, Vec<&'a Span>> = FxHashMap::default();
        for span in spans {
            if span.validate().is_err() {
                continue;
            }
            outgoing.entry(span.start).or_default().push(span);
            incoming.entry(span.end).or_default().push(span);
        }
        Self { outgoing, incoming }
    }

    /// Spans leaving `tower`, in input order.
    pub fn outgoing(&self, tower: TowerId) -> &[&'a Span] {
        self.outgoing.get(&tower).map_or(&[], Vec::as_slice)
    }

    /// Spans arriving at `tower`, in input order.
    pub fn incoming(&self, tower: TowerId) -> &[&'a Span] {
        self.incoming.get(&tower).map_or(&[], Vec::as_slice)
    }

    /// Derive the orientation bearing for `tower`, degrees in `[0, 360)`.
    ///
    /// The first outgoing span wins: bearing from this tower to the span's
    /// end. A terminal tower (no outgoing span) falls back to the bearing
    /// of its first incoming span, previous tower → this one, so the model
    /// keeps facing along the line. An isolated tower faces north (0).
    ///
    /// `towers` must index the towers of the same snapshot; spans whose far
    /// end is missing from it are passed over.
    pub fn bearing_for(&self, tower: &Tower, towers: &FxHashMap<TowerId, &Tower>) -> f64 {
        for span in self.outgoing(tower.id) {
            if let Some(end) = towers.get(&span.end) {
                return initial_bearing(tower.position.horizontal(), end.position.horizontal());
            }
        }
        for span in self.incoming(tower.id) {
            if let Some(start) = towers.get(&span.start) {
                return initial_bearing(start.position.horizontal(), tower.position.horizontal());
            }
        }
        0.0
    }
}

/// Bearings for every tower in `towers`, derived from `spans`.
///
/// Convenience over [`SpanGraph`] for hosts and tooling that want the
/// whole map at once; invalid towers get no entry.
pub fn tower_bearings(towers: &[Tower], spans: &[Span]) -> std::collections::HashMap<TowerId, f64> {
    let index: FxHashMap<TowerId, &Tower> = towers
        .iter()
        .filter(|t| t.validate().is_ok())
        .map(|t| (t.id, t))
        .collect();
    let graph = SpanGraph::build(spans);
    index
        .values()
        .map(|&tower| (tower.id, graph.bearing_for(tower, &index)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pylon_geom::GeoPoint;
    use pylon_model::{Rgba, StructureKind};

    fn tower(id: u64, lon: f64, lat: f64) -> Tower {
        Tower {
            id: TowerId(id),
            code: u32::try_from(id).unwrap(),
            label: id.to_string(),
            position: GeoPoint::new(lon, lat, 0.0),
            height_m: 45.0,
            deflection_deg: 0.0,
            kind: StructureKind::Suspension,
            color: Rgba::WHITE,
            hidden: false,
        }
    }

    fn index(towers: &[Tower]) -> FxHashMap<TowerId, &Tower> {
        towers.iter().map(|t| (t.id, t)).collect()
    }

    #[test]
    fn outgoing_span_sets_the_bearing() {
        // Tower 2 sits due east of tower 1.
        let towers = vec![tower(1, 0.0, 0.0), tower(2, 0.01, 0.0)];
        let spans = vec![Span::between(TowerId(1), TowerId(2))];
        let graph = SpanGraph::build(&spans);
        let bearing = graph.bearing_for(&towers[0], &index(&towers));
        assert!((bearing - 90.0).abs() < 1e-6, "bearing = {bearing}");
    }

    #[test]
    fn terminal_tower_reuses_incoming_bearing() {
        let towers = vec![tower(1, 0.0, 0.0), tower(2, 0.01, 0.0)];
        let spans = vec![Span::between(TowerId(1), TowerId(2))];
        let graph = SpanGraph::build(&spans);
        let bearing = graph.bearing_for(&towers[1], &index(&towers));
        // Previous → this is also (approximately) due east.
        assert!((bearing - 90.0).abs() < 0.01, "bearing = {bearing}");
    }

    #[test]
    fn isolated_tower_faces_north() {
        let towers = vec![tower(7, -46.6, -23.5)];
        let graph = SpanGraph::build(&[]);
        assert!(graph.bearing_for(&towers[0], &index(&towers)).abs() < f64::EPSILON);
    }

    #[test]
    fn first_outgoing_span_wins_at_branches() {
        let towers = vec![
            tower(1, 0.0, 0.0),
            tower(2, 0.01, 0.0),  // east
            tower(3, 0.0, 0.01),  // north
        ];
        let spans = vec![
            Span::between(TowerId(1), TowerId(3)),
            Span::between(TowerId(1), TowerId(2)),
        ];
        let graph = SpanGraph::build(&spans);
        let bearing = graph.bearing_for(&towers[0], &index(&towers));
        // The 1→3 span was listed first, so north wins.
        assert!(bearing.abs() < 1e-6, "bearing = {bearing}");
    }

    #[test]
    fn span_to_missing_tower_is_passed_over() {
        let towers = vec![tower(1, 0.0, 0.0), tower(2, 0.01, 0.0)];
        let spans = vec![
            Span::between(TowerId(1), TowerId(99)),
            Span::between(TowerId(1), TowerId(2)),
        ];
        let graph = SpanGraph::build(&spans);
        let bearing = graph.bearing_for(&towers[0], &index(&towers));
        assert!((bearing - 90.0).abs() < 1e-6, "bearing = {bearing}");
    }

    #[test]
    fn self_spans_never_enter_the_graph() {
        let spans = vec![Span::between(TowerId(1), TowerId(1))];
        let graph = SpanGraph::build(&spans);
        assert!(graph.outgoing(TowerId(1)).is_empty());
        assert!(graph.incoming(TowerId(1)).is_empty());
    }
}
