//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and the frame-driven state machine of the
//! falling-block game. It has no dependency on terminals or I/O: time and
//! randomness come from a [`Platform`] supplied by the host, which makes every
//! game replayable from a scripted platform.
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid, collision detection and row clearing
//! - [`pieces`]: the seven shapes, rotation and wall kick
//! - [`game`]: the [`Game`] engine (events, falling, locking, scoring, pause)
//! - [`scoring`]: line clear points, drop bonuses and level pacing
//! - [`config`]: optional rules and the starting fall speed
//! - [`platform`]: clock and random source abstraction
//! - [`rng`]: small deterministic generator used by the platforms
//! - [`snapshot`]: copyable render view of a game
//!
//! # Game Rules
//!
//! - Row 0 is the spawn row: it is never cleared and pieces may poke above it
//! - A piece that cannot step down while still in the top two rows ends the game
//! - Each level needs 10 more cleared rows and speeds the fall up by 10%
//! - Dropping with the shadow visible earns a smaller bonus
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{Game, GameStatus, ManualPlatform};
//! use falling_blocks_types::GameEvents;
//!
//! let mut game = Game::new(ManualPlatform::new().with_script([0, 1]));
//! assert_eq!(game.falling().y, 0);
//!
//! game.update(GameEvents::MOVE_RIGHT | GameEvents::DROP, 16);
//! assert_eq!(game.stats().total_pieces, 1);
//! assert_eq!(game.status(), GameStatus::Running);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod pieces;
pub mod platform;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use falling_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{ConfigError, GameConfig};
pub use error::ErrorCode;
pub use game::{Game, GameStatus, Stats};
pub use pieces::{get_shape, try_rotate, Tetromino};
pub use platform::{ManualPlatform, Platform, SystemPlatform};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
