// SPDX-License-Identifier: Apache-2.0
//! Scene port trait defining the renderer contract.

use crate::RenderLayer;

/// Scene rendering port trait.
///
/// Implementors receive layer sets and draw. No time ownership, no domain
/// logic. RenderContext/FrameResult are adapter-local concerns, not part of
/// this contract.
///
/// # Replacement Semantics
///
/// Each [`apply_layers`](ScenePort::apply_layers) call carries the complete
/// current layer set. Layers whose id was present last pass but is absent
/// now must be torn down by the adapter; there is no incremental patch
/// protocol. Applying the same set twice is idempotent.
pub trait ScenePort {
    /// Replace the current layer set with `layers`.
    fn apply_layers(&mut self, layers: &[RenderLayer]);

    /// Render the current scene.
    ///
    /// Takes no parameters — profiling/timing is the adapter's concern.
    fn render(&mut self);

    /// Resize the viewport.
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Dispose all resources.
    fn dispose(&mut self);
}
