//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond conversions, so they can be
//! shared by the simulation core, the input layer and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, y grows downward)
//! - **Spawn position**: `x = (BOARD_WIDTH - size) / 2`, `y = 0`
//!
//! # Scoring Constants
//!
//! | Rows | Base points |
//! |------|-------------|
//! | 1 | 400 |
//! | 2 | 1000 |
//! | 3 | 3000 |
//! | 4 | 12000 |
//!
//! Points are multiplied by `level + 1`. Soft drop and hard drop bonuses are
//! fractions of the two-row score (`SCORE_2_FILLED_ROW`).
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{Color, GameEvents, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_index(0);
//! assert_eq!(kind, PieceKind::I);
//! assert_eq!(kind.color(), Color::Cyan);
//!
//! let mut events = GameEvents::MOVE_LEFT;
//! events |= GameEvents::ROTATE_CW;
//! assert!(events.contains(GameEvents::ROTATE_CW));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use bitflags::bitflags;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (22 rows)
pub const BOARD_HEIGHT: usize = 22;

/// Side of the square buffer that holds a piece (size of the largest piece)
pub const TETROMINO_SIZE: usize = 4;

/// Number of tetromino types
pub const TETROMINO_TYPES: usize = 7;

/// Initial delay between automatic falling moves in milliseconds
pub const INIT_DELAY_FALL_MS: u32 = 1000;

/// Score for clearing one row at level 0
pub const SCORE_1_FILLED_ROW: u64 = 400;

/// Score for clearing two rows at level 0
pub const SCORE_2_FILLED_ROW: u64 = 1000;

/// Score for clearing three rows at level 0
pub const SCORE_3_FILLED_ROW: u64 = 3000;

/// Score for clearing four rows at level 0
pub const SCORE_4_FILLED_ROW: u64 = 12000;

/// Hard drop bonus divisor of `SCORE_2_FILLED_ROW` when the shadow is hidden (factor 0.05)
pub const SCORE_DROP_DIVISOR: u64 = 20;

/// Hard drop bonus divisor of `SCORE_2_FILLED_ROW` when the shadow is shown (factor 0.01)
pub const SCORE_DROP_WITH_SHADOW_DIVISOR: u64 = 100;

/// Soft drop bonus divisor of `SCORE_2_FILLED_ROW` (factor 0.001)
pub const SCORE_MOVE_DOWN_DIVISOR: u64 = 1000;

/// Number of cleared rows needed per level
pub const FILLED_ROWS_FOR_LEVEL_UP: u32 = 10;

/// Fall delay is multiplied by `DELAY_FACTOR_FOR_LEVEL_UP / DELAY_DIVISOR_FOR_LEVEL_UP` on level up
pub const DELAY_FACTOR_FOR_LEVEL_UP: u32 = 9;

/// See [`DELAY_FACTOR_FOR_LEVEL_UP`]
pub const DELAY_DIVISOR_FOR_LEVEL_UP: u32 = 10;

/// Delayed autoshift initial delay in milliseconds
pub const DAS_DELAY_MS: u32 = 200;

/// Delayed autoshift repeat interval for left, right and down moves
pub const DAS_MOVE_MS: u32 = 40;

/// Delay before a held rotation key starts repeating
pub const ROTATION_AUTOREPEAT_DELAY_MS: u32 = 375;

/// Repeat interval of a held rotation key
pub const ROTATION_AUTOREPEAT_MS: u32 = 200;

/// Front end frame interval in milliseconds (~60 FPS)
pub const FRAME_MS: u32 = 16;


/// The seven tetromino piece kinds
///
/// The declaration order is the type index used by the random generator
/// and by the per-type statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in index order
    pub const ALL: [PieceKind; TETROMINO_TYPES] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Map an arbitrary index (e.g. a random value) onto a kind, modulo 7
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % TETROMINO_TYPES]
    }

    /// Type index (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed color of the kind
    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Uppercase letter
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Cell colors
///
/// `White` is reserved for effects and is never locked into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Cyan,
    Red,
    Blue,
    Orange,
    Green,
    Yellow,
    Purple,
}

/// A cell on the board or in a piece buffer
///
/// - `None`: Empty cell
/// - `Some(Color)`: filled cell
pub type Cell = Option<Color>;

bitflags! {
    /// Discrete input events, OR-ed together by the front end and consumed
    /// once per update tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct GameEvents: u32 {
        const MOVE_DOWN   = 1 << 1;
        const MOVE_LEFT   = 1 << 2;
        const MOVE_RIGHT  = 1 << 3;
        /// Rotate clockwise
        const ROTATE_CW   = 1 << 4;
        /// Rotate counter-clockwise
        const ROTATE_CCW  = 1 << 5;
        /// Hard drop
        const DROP        = 1 << 6;
        const PAUSE       = 1 << 7;
        const RESTART     = 1 << 8;
        /// Toggle the preview piece
        const SHOW_NEXT   = 1 << 9;
        /// Toggle the shadow piece
        const SHOW_SHADOW = 1 << 10;
        /// Leave the game. Ignored by the simulation, handled by front ends.
        const QUIT        = 1 << 11;
    }
}
