//! Steering input: discrete key events folded into four held-direction flags.
//!
//! # Invariants
//! - Platform key codes are mapped to [`Direction`]s by the application, not here.
//! - Flags are only mutated through [`InputFlags::apply`] / [`InputFlags::set`].

pub mod controls;

pub use controls::{Direction, InputEvent, InputFlags, ParseDirectionError};

pub fn crate_info() -> &'static str {
    "astro-input v0.1.0"
}
