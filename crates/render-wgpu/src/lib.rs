//! wgpu render backend for the demo.
//!
//! Draws the lit ship (non-indexed) and the light indicator cube (indexed),
//! one draw call each per frame.
//!
//! # Invariants
//! - Renderer never mutates pose state; it consumes [`astro_render::FrameTransforms`].
//! - Shader compile and validation errors are logged, never fatal.
//! - GPU bring-up failures are returned as [`GpuInitError`].

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, GpuInitError};
pub use gpu::WgpuRenderer;
pub use shaders::{
    LIGHT_SHADER, LIGHT_SHADER_FILE, SHIP_SHADER, SHIP_SHADER_FILE, ShaderError, ShaderLibrary,
};
