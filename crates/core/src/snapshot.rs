use crate::error::ErrorCode;
use crate::game::Stats;
use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INIT_DELAY_FALL_MS};

/// Plain copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Column-major cells, `board[x][y]`
    pub board: [[Cell; BOARD_HEIGHT]; BOARD_WIDTH],
    pub falling: Tetromino,
    pub next: Tetromino,
    pub stats: Stats,
    pub shadow_gap: i32,
    pub show_preview: bool,
    /// Shadow feature enabled and toggled on
    pub show_shadow: bool,
    pub paused: bool,
    pub game_over: bool,
    pub fall_delay_ms: u32,
    pub error_code: ErrorCode,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_HEIGHT]; BOARD_WIDTH];
        self.falling = Tetromino::from_kind(PieceKind::I);
        self.next = Tetromino::from_kind(PieceKind::I);
        self.stats = Stats::default();
        self.shadow_gap = 0;
        self.show_preview = true;
        self.show_shadow = true;
        self.paused = false;
        self.game_over = false;
        self.fall_delay_ms = INIT_DELAY_FALL_MS;
        self.error_code = ErrorCode::None;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Row of the shadow anchor when the shadow should be drawn
    pub fn shadow_y(&self) -> Option<i32> {
        if self.show_shadow && self.shadow_gap > 0 {
            Some(self.falling.y + self.shadow_gap)
        } else {
            None
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_HEIGHT]; BOARD_WIDTH],
            falling: Tetromino::from_kind(PieceKind::I),
            next: Tetromino::from_kind(PieceKind::I),
            stats: Stats::default(),
            shadow_gap: 0,
            show_preview: true,
            show_shadow: true,
            paused: false,
            game_over: false,
            fall_delay_ms: INIT_DELAY_FALL_MS,
            error_code: ErrorCode::None,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_is_hidden_when_resting_or_toggled_off() {
        let mut s = GameSnapshot::default();
        s.falling.y = 3;
        s.shadow_gap = 5;
        assert_eq!(s.shadow_y(), Some(8));

        s.shadow_gap = 0;
        assert_eq!(s.shadow_y(), None);

        s.shadow_gap = 5;
        s.show_shadow = false;
        assert_eq!(s.shadow_y(), None);
    }

    #[test]
    fn playable_tracks_pause_and_game_over() {
        let mut s = GameSnapshot::default();
        assert!(s.playable());
        s.paused = true;
        assert!(!s.playable());
        s.paused = false;
        s.game_over = true;
        assert!(!s.playable());
    }
}
