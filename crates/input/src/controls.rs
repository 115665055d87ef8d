use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four steering directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown direction `{0}` (expected left, right, up or down)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// A discrete event produced by the platform's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or quit key pressed.
    Quit,
    Pressed(Direction),
    Released(Direction),
}

/// Which directions are currently held.
///
/// Flags follow key state exactly: set on press, cleared on release.
/// The pose update reads them and never writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags with every listed direction held.
    pub fn holding(directions: &[Direction]) -> Self {
        let mut flags = Self::default();
        for &d in directions {
            flags.set(d, true);
        }
        flags
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        let flag = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        *flag = held;
    }

    /// Apply a key event. `Quit` is not a direction and leaves flags alone.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(d) => self.set(d, true),
            InputEvent::Released(d) => self.set(d, false),
            InputEvent::Quit => {}
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}
