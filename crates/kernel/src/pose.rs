use astro_input::InputFlags;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Largest bank angle in either direction, in radians.
pub const MAX_TILT: f32 = FRAC_PI_4;
/// Horizontal travel limit in either direction.
pub const MAX_OFFSET: f32 = 5.0;

const OFFSET_STEP: f32 = 0.1;
/// Tilt step while the ship is still banked the other way.
const TILT_RECOVER_STEP: f32 = 0.05;
/// Tilt step once the ship is level or banked toward the input.
const TILT_EASE_STEP: f32 = 0.01;
const TILT_RELAX_STEP: f32 = 0.05;
/// Below this magnitude a relaxing tilt snaps to level.
const TILT_SNAP: f32 = 0.1;

pub const LIGHT_START: Vec3 = Vec3::new(0.0, 5.0, -20.0);
const LIGHT_SWING: f64 = 20.0;
const LIGHT_RATE: f64 = 0.005;

/// The scene light: position and color pushed to the lit shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            position: LIGHT_START,
            color: Vec3::ONE,
        }
    }
}

/// Everything the renderer needs to place the ship and the light.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseState {
    /// Horizontal offset, within `[-MAX_OFFSET, MAX_OFFSET]`.
    pub offset_x: f32,
    /// Bank about Z, positive when steering left.
    pub tilt_x: f32,
    /// Pitch about X, positive when steering up.
    pub tilt_y: f32,
    pub light: LightState,
}

/// Advance the pose by one frame.
///
/// Left and right (and up and down) are not mutually exclusive: when both
/// are held each applies in turn, left before right and up before down.
/// `elapsed_ticks` is milliseconds since the loop started and only drives
/// the light.
pub fn update_pose(state: &PoseState, input: &InputFlags, elapsed_ticks: u64) -> PoseState {
    let mut offset_x = state.offset_x;
    if input.left && offset_x > -MAX_OFFSET {
        offset_x = (offset_x - OFFSET_STEP).max(-MAX_OFFSET);
    }
    if input.right && offset_x < MAX_OFFSET {
        offset_x = (offset_x + OFFSET_STEP).min(MAX_OFFSET);
    }

    let mut light = state.light;
    light.position.z = light_z(elapsed_ticks);

    PoseState {
        offset_x,
        tilt_x: steer_axis(state.tilt_x, input.left, input.right),
        tilt_y: steer_axis(state.tilt_y, input.up, input.down),
        light,
    }
}

/// Light depth at the given tick: swings between -40 and 0.
pub fn light_z(elapsed_ticks: u64) -> f32 {
    (LIGHT_SWING * (LIGHT_RATE * elapsed_ticks as f64).sin() - LIGHT_SWING) as f32
}

fn steer_axis(tilt: f32, positive: bool, negative: bool) -> f32 {
    if !positive && !negative {
        return relax(tilt);
    }
    let mut tilt = tilt;
    if positive && tilt < MAX_TILT {
        // Level (0.0) counts as already on the positive side.
        let step = if tilt < 0.0 {
            TILT_RECOVER_STEP
        } else {
            TILT_EASE_STEP
        };
        tilt = (tilt + step).min(MAX_TILT);
    }
    if negative && tilt > -MAX_TILT {
        let step = if tilt > 0.0 {
            TILT_RECOVER_STEP
        } else {
            TILT_EASE_STEP
        };
        tilt = (tilt - step).max(-MAX_TILT);
    }
    tilt
}

fn relax(tilt: f32) -> f32 {
    if tilt > TILT_SNAP {
        tilt - TILT_RELAX_STEP
    } else if tilt < -TILT_SNAP {
        tilt + TILT_RELAX_STEP
    } else {
        0.0
    }
}
