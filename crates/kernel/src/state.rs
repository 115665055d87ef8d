use crate::pose::{PoseState, update_pose};
use astro_input::{InputEvent, InputFlags};

/// Process-lifetime game state, threaded through the loop by `&mut`.
///
/// The pose update sees only `input`; the renderer sees only `pose`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub pose: PoseState,
    pub input: InputFlags,
    running: bool,
    elapsed_ticks: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            pose: PoseState::default(),
            input: InputFlags::default(),
            running: true,
            elapsed_ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks passed to the most recent [`GameState::step`].
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn handle(&mut self, event: InputEvent) {
        if event == InputEvent::Quit {
            tracing::debug!("quit requested");
            self.running = false;
        }
        self.input.apply(event);
    }

    /// Advance one frame.
    pub fn step(&mut self, elapsed_ticks: u64) {
        self.elapsed_ticks = elapsed_ticks;
        self.pose = update_pose(&self.pose, &self.input, elapsed_ticks);
        tracing::trace!(
            x = self.pose.light.position.x,
            y = self.pose.light.position.y,
            z = self.pose.light.position.z,
            "light pos"
        );
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_input::Direction;

    #[test]
    fn starts_running_at_rest() {
        let state = GameState::new();
        assert!(state.is_running());
        assert_eq!(state.pose, PoseState::default());
        assert!(!state.input.any());
    }

    #[test]
    fn quit_stops_running() {
        let mut state = GameState::new();
        state.handle(InputEvent::Quit);
        assert!(!state.is_running());
    }

    #[test]
    fn held_key_moves_ship_each_step() {
        let mut state = GameState::new();
        state.handle(InputEvent::Pressed(Direction::Right));
        state.step(0);
        state.step(16);
        assert!((state.pose.offset_x - 0.2).abs() < 1e-5);
        assert_eq!(state.elapsed_ticks(), 16);

        state.handle(InputEvent::Released(Direction::Right));
        state.step(32);
        assert!((state.pose.offset_x - 0.2).abs() < 1e-5);
        assert_eq!(state.pose.tilt_x, 0.0);
    }

    #[test]
    fn step_moves_light() {
        let mut state = GameState::new();
        state.step(500);
        assert_eq!(state.pose.light.position.z, crate::pose::light_z(500));
    }
}
