//! Game kernel: player pose, the per-frame pose update, light motion and
//! frame pacing.
//!
//! # Invariants
//! - [`update_pose`] is a pure function of pose, input flags and ticks.
//! - Tilts stay within `±MAX_TILT`, offset within `±MAX_OFFSET`.
//! - Pacing waits for the frame deadline; it never spins.

pub mod clock;
pub mod pose;
pub mod state;

pub use clock::{DEFAULT_FPS, FrameClock};
pub use pose::{LightState, MAX_OFFSET, MAX_TILT, PoseState, light_z, update_pose};
pub use state::GameState;

pub fn crate_info() -> &'static str {
    "astro-kernel v0.1.0"
}
