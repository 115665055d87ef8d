//! Rendering Adapter: renderer-agnostic frame description.
//!
//! Turns a [`astro_kernel::PoseState`] into the model/view/projection
//! matrices and light uniforms for the ship and light passes. Backends (the
//! wgpu renderer, the debug text renderer) consume [`FrameTransforms`].
//!
//! # Invariants
//! - Renderers never mutate pose state.
//! - Ship model is `T(offset) · Rz(tilt_x) · Rx(tilt_y)`, viewed from 20 units back.
//! - Light model is `T(light position)` with an identity view.

mod renderer;
mod transforms;

pub use renderer::{DebugTextRenderer, Renderer};
pub use transforms::{
    FrameTransforms, ObjectTransforms, Projection, SHIP_VIEW_DISTANCE, ship_model,
};

pub fn crate_info() -> &'static str {
    "astro-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
