// SPDX-License-Identifier: Apache-2.0
//! The composition pass: model snapshot → render layers.

use pylon_geom::catenary;
use pylon_model::{CableSettings, Span, Tower, TowerId};
use pylon_scene_port::{
    LayerGeometry, LayerId, LayerParams, MarkerDef, ModelInstance, PathDef, RenderLayer,
};
use rustc_hash::FxHashMap;

use crate::anchors::anchor_world_position;
use crate::chain::synthesize_spans;
use crate::orient::SpanGraph;
use crate::REFERENCE_MODEL_HEIGHT_M;

/// Tuning knobs for a composition pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComposeOptions {
    /// Catenary samples per cable path.
    pub segments: usize,
    /// Authored height of the tower asset, meters.
    pub reference_model_height_m: f64,
    /// Anchor marker radius, pixels.
    pub marker_size: f32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            segments: 40,
            reference_model_height_m: REFERENCE_MODEL_HEIGHT_M,
            marker_size: 4.0,
        }
    }
}

/// Compose the render layers for one project snapshot.
///
/// Deterministic and fully re-derived: the output depends only on the
/// arguments, and every call allocates fresh descriptors. The returned
/// order is fixed — tower models, cable paths, anchor markers — so
/// adapters can rely on draw order.
///
/// Element policy:
/// - Towers failing [`Tower::validate`] are omitted everywhere.
/// - `hidden` towers are omitted from every layer, and no cable path
///   touches them.
/// - Spans whose endpoints are missing, identical, or hidden produce no
///   geometry.
/// - When `spans` is empty the sequential chain is synthesized from the
///   tower labels.
pub fn compose(
    towers: &[Tower],
    spans: &[Span],
    settings: &CableSettings,
    options: &ComposeOptions,
) -> Vec<RenderLayer> {
    // Valid towers index — hidden towers stay in the index so orientation
    // can still follow the line through them, but they are filtered from
    // every geometry emission below.
    let valid: FxHashMap<TowerId, &Tower> = towers
        .iter()
        .filter(|t| t.validate().is_ok())
        .map(|t| (t.id, t))
        .collect();

    let synthesized;
    let effective_spans: &[Span] = if spans.is_empty() {
        synthesized = synthesize_spans(valid.values().copied());
        &synthesized
    } else {
        spans
    };
    let graph = SpanGraph::build(effective_spans);

    let mut visible: Vec<&Tower> = valid.values().filter(|t| !t.hidden).copied().collect();
    visible.sort_by_key(|t| t.id);

    let tower_layer = compose_towers(&visible, &valid, &graph, options);
    let cable_layer = compose_cables(effective_spans, &valid, settings, options);
    let marker_layer = compose_markers(&visible, settings, options);

    vec![tower_layer, cable_layer, marker_layer]
}

fn compose_towers(
    visible: &[&Tower],
    valid: &FxHashMap<TowerId, &Tower>,
    graph: &SpanGraph<'_>,
    options: &ComposeOptions,
) -> RenderLayer {
    let instances = visible
        .iter()
        .map(|&tower| {
            // The model origin sits at the asset's center, so the instance
            // is lifted by half the tower height. The renderer-facing yaw
            // adds 90° for the asset's authored facing plus the surveyed
            // deflection override.
            let bearing = graph.bearing_for(tower, valid);
            let scale = tower.height_m / options.reference_model_height_m;
            ModelInstance {
                key: format!("tower:{}", tower.id),
                position: [
                    tower.position.lon,
                    tower.position.lat,
                    tower.height_m / 2.0,
                ],
                yaw_deg: (bearing + 90.0 + tower.deflection_deg).rem_euclid(360.0),
                scale: [scale, scale, scale],
                color: tower.color.0,
            }
        })
        .collect();

    RenderLayer {
        id: LayerId::new("towers"),
        geometry: LayerGeometry::Models(instances),
        params: LayerParams::default(),
    }
}

fn compose_cables(
    spans: &[Span],
    valid: &FxHashMap<TowerId, &Tower>,
    settings: &CableSettings,
    options: &ComposeOptions,
) -> RenderLayer {
    let mut paths = Vec::new();
    for span in spans {
        if span.validate().is_err() {
            continue;
        }
        let (Some(&start), Some(&end)) = (valid.get(&span.start), valid.get(&span.end)) else {
            continue;
        };
        if start.hidden || end.hidden {
            continue;
        }
        let tension = span.tension.unwrap_or(settings.tension);
        for anchor in settings.enabled_anchors() {
            let from = anchor_world_position(start, anchor, settings);
            let to = anchor_world_position(end, anchor, settings);
            let points = catenary::sample(from, to, tension, options.segments)
                .into_iter()
                .map(|p| [p.lon, p.lat, p.alt])
                .collect();
            let base = span.color.unwrap_or(anchor.color);
            paths.push(PathDef {
                key: format!("span:{}:{}:{}", span.start, span.end, anchor.id),
                points,
                width: anchor.width,
                color: base.with_opacity(settings.global_opacity).0,
            });
        }
    }

    RenderLayer {
        id: LayerId::new("cables"),
        geometry: LayerGeometry::Paths(paths),
        params: LayerParams::default(),
    }
}

fn compose_markers(
    visible: &[&Tower],
    settings: &CableSettings,
    options: &ComposeOptions,
) -> RenderLayer {
    let markers = visible
        .iter()
        .flat_map(|&tower| {
            settings.enabled_anchors().map(|anchor| {
                let p = anchor_world_position(tower, anchor, settings);
                MarkerDef {
                    key: format!("anchor:{}:{}", tower.id, anchor.id),
                    position: [p.lon, p.lat, p.alt],
                    size: options.marker_size,
                    color: anchor.color.0,
                }
            })
        })
        .collect();

    RenderLayer {
        id: LayerId::new("anchors"),
        geometry: LayerGeometry::Points(markers),
        // Markers are a debugging aid; drawing them through terrain and
        // tower geometry is the point.
        params: LayerParams {
            depth_test: false,
            opacity: 1.0,
        },
    }
}
