//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameEvents`] bits and
//! provides a delayed auto-shift handler suitable for terminal environments
//! (including terminals without key-release events).

pub mod handler;
pub mod map;

pub use falling_blocks_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
