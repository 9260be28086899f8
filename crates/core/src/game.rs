//! Game module - the simulation engine
//!
//! [`Game`] owns the board, the falling and preview pieces, statistics and
//! timing state. Front ends OR input events into a [`GameEvents`] mask and call
//! [`Game::update`] once per frame with the current time; the engine advances
//! synchronously and raises a "state changed" flag for renderers.

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::error::ErrorCode;
use crate::pieces::{try_rotate, Tetromino};
use crate::platform::Platform;
use crate::scoring::{
    calculate_line_score, hard_drop_score, next_fall_delay, reaches_next_level, soft_drop_score,
};
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvents, PieceKind, TETROMINO_TYPES};

/// Statistics of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub score: u64,
    /// Total cleared rows
    pub lines: u32,
    /// Total locked pieces
    pub total_pieces: u32,
    pub level: u32,
    /// Locked pieces per kind, indexed by [`PieceKind::index`]
    pub pieces: [u32; TETROMINO_TYPES],
}

/// Top-level state of the update loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Over,
}

/// The simulation engine
#[derive(Debug, Clone)]
pub struct Game<P: Platform> {
    platform: P,
    config: GameConfig,
    board: Board,
    falling: Tetromino,
    next: Tetromino,
    stats: Stats,
    events: GameEvents,
    error_code: ErrorCode,
    /// Time of the previous update
    system_time: u64,
    /// Delay between automatic falling moves
    fall_delay: u32,
    last_fall_time: u64,
    over: bool,
    paused: bool,
    show_preview: bool,
    show_shadow: bool,
    shadow_gap: i32,
    state_changed: bool,
}

impl<P: Platform> Game<P> {
    /// Create a game with the default rules and start it.
    pub fn new(platform: P) -> Self {
        Self::build(platform, GameConfig::default())
    }

    /// Create a game with custom rules and start it.
    pub fn with_config(platform: P, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(platform, config))
    }

    fn build(platform: P, config: GameConfig) -> Self {
        let now = platform.current_time_ms();
        let placeholder = Tetromino::from_kind(PieceKind::I);
        let mut game = Self {
            platform,
            config,
            board: Board::new(),
            falling: placeholder,
            next: placeholder,
            stats: Stats::default(),
            events: GameEvents::empty(),
            error_code: ErrorCode::None,
            system_time: now,
            fall_delay: config.initial_fall_delay_ms,
            last_fall_time: now,
            over: false,
            paused: false,
            show_preview: true,
            show_shadow: config.shadow,
            shadow_gap: 0,
            state_changed: false,
        };
        game.start(now);
        game
    }

    /// Reset every piece of per-game state and deal two fresh pieces.
    fn start(&mut self, now: u64) {
        self.error_code = ErrorCode::None;
        self.system_time = now;
        self.last_fall_time = now;
        self.over = false;
        self.paused = false;
        self.show_preview = true;
        self.show_shadow = self.config.shadow;
        self.events = GameEvents::empty();
        self.fall_delay = self.config.initial_fall_delay_ms;
        self.stats = Stats::default();

        self.platform.seed_random(now);
        self.board.clear();

        self.falling = Tetromino::from_kind(self.random_kind());
        self.falling.reset_position();
        self.next = Tetromino::from_kind(self.random_kind());

        tracing::debug!(
            falling = self.falling.kind.as_str(),
            next = self.next.kind.as_str(),
            "game started"
        );
        self.on_tetromino_moved();
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.platform.random() as usize)
    }

    /// Queue events for the next [`tick`](Self::tick).
    pub fn push_events(&mut self, events: GameEvents) {
        self.events |= events;
    }

    /// Events queued and not yet consumed
    pub fn pending_events(&self) -> GameEvents {
        self.events
    }

    /// Advance one frame using the platform clock and the queued events.
    pub fn tick(&mut self) {
        let now = self.platform.current_time_ms();
        self.update(GameEvents::empty(), now);
    }

    /// Advance one frame at time `now_ms`, consuming `events` together with
    /// anything queued through [`push_events`](Self::push_events).
    ///
    /// Pending events are always cleared once the frame is processed.
    pub fn update(&mut self, events: GameEvents, now_ms: u64) {
        self.events |= events;

        if self.over {
            if self.events.contains(GameEvents::RESTART) {
                self.start(now_ms);
            }
            self.events = GameEvents::empty();
            return;
        }

        // Pause wins over everything else queued for this frame.
        if self.events.contains(GameEvents::PAUSE) {
            self.paused = !self.paused;
            self.state_changed = true;
            self.events = GameEvents::empty();
        }

        if self.paused {
            // Shift the fall timer so resuming does not drop the piece at once.
            self.last_fall_time += now_ms.saturating_sub(self.system_time);
        } else {
            if !self.events.is_empty() {
                self.dispatch(self.events);
                self.events = GameEvents::empty();
            }
            if now_ms.saturating_sub(self.last_fall_time) >= u64::from(self.fall_delay) {
                self.move_tetromino(0, 1);
                self.last_fall_time = now_ms;
            }
        }
        self.system_time = now_ms;
    }

    fn dispatch(&mut self, events: GameEvents) {
        if events.contains(GameEvents::SHOW_NEXT) {
            self.show_preview = !self.show_preview;
            self.state_changed = true;
        }
        if self.config.shadow && events.contains(GameEvents::SHOW_SHADOW) {
            self.show_shadow = !self.show_shadow;
            self.state_changed = true;
        }
        if events.contains(GameEvents::DROP) {
            self.drop_tetromino();
        }
        if events.contains(GameEvents::ROTATE_CW) {
            self.rotate_tetromino(true);
        }
        if self.config.rotate_ccw && events.contains(GameEvents::ROTATE_CCW) {
            self.rotate_tetromino(false);
        }
        if events.contains(GameEvents::MOVE_RIGHT) {
            self.move_tetromino(1, 0);
        } else if events.contains(GameEvents::MOVE_LEFT) {
            self.move_tetromino(-1, 0);
        }
        if events.contains(GameEvents::MOVE_DOWN) && !self.over {
            self.stats.score += soft_drop_score(self.stats.level);
            self.move_tetromino(0, 1);
        }
    }

    /// Whether the falling piece, moved by (dx, dy), would collide.
    pub fn check_collision(&self, dx: i32, dy: i32) -> bool {
        self.board.check_collision(&self.falling, dx, dy)
    }

    /// Rotate the falling piece. Returns false when the rotation is blocked.
    pub fn rotate_tetromino(&mut self, clockwise: bool) -> bool {
        if self.over {
            return false;
        }
        if self.falling.kind == PieceKind::O {
            return true;
        }
        match try_rotate(&self.board, &self.falling, clockwise, self.config.wall_kick) {
            Some(rotated) => {
                self.falling = rotated;
                self.on_tetromino_moved();
                true
            }
            None => false,
        }
    }

    /// Move the falling piece by (dx, dy).
    ///
    /// A blocked downward step locks the piece (or ends the game when the
    /// piece is still in the top two rows). Other blocked moves are ignored.
    pub fn move_tetromino(&mut self, dx: i32, dy: i32) {
        if self.over {
            return;
        }
        if !self.check_collision(dx, dy) {
            self.falling.x += dx;
            self.falling.y += dy;
        } else if dy == 1 {
            if self.falling.y <= 1 {
                self.over = true;
                tracing::debug!(
                    score = self.stats.score,
                    lines = self.stats.lines,
                    level = self.stats.level,
                    "game over"
                );
            } else {
                self.lock_falling();
            }
        }
        self.on_tetromino_moved();
    }

    fn lock_falling(&mut self) {
        self.board.lock_piece(&self.falling);

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.on_filled_rows(cleared.len());
        }
        self.stats.total_pieces += 1;
        self.stats.pieces[self.falling.kind.index()] += 1;

        // Promote the preview piece.
        self.falling.copy_shape_from(&self.next);
        self.falling.reset_position();
        self.on_tetromino_moved();

        self.next = Tetromino::from_kind(self.random_kind());
    }

    fn on_filled_rows(&mut self, rows: usize) {
        self.stats.lines += rows as u32;

        match calculate_line_score(rows, self.stats.level) {
            Some(points) => self.stats.score += points,
            None => {
                self.error_code = ErrorCode::Assert;
                tracing::error!(rows, "one lock cleared an impossible number of rows");
            }
        }

        if reaches_next_level(self.stats.lines, self.stats.level) {
            self.stats.level += 1;
            self.fall_delay = next_fall_delay(self.fall_delay);
            tracing::debug!(
                level = self.stats.level,
                fall_delay_ms = self.fall_delay,
                "level up"
            );
        }
    }

    /// Hard drop: move the falling piece straight down and lock it.
    pub fn drop_tetromino(&mut self) {
        if self.over {
            return;
        }
        let shadow_shown = self.config.shadow && self.show_shadow;
        let distance = if self.config.shadow {
            self.shadow_gap
        } else {
            self.free_rows_below()
        };
        self.move_tetromino(0, distance);
        // The piece is now resting, so this step locks it.
        self.move_tetromino(0, 1);

        self.stats.score += hard_drop_score(self.stats.level, shadow_shown);
    }

    /// Free rows directly below the falling piece
    fn free_rows_below(&self) -> i32 {
        let mut y = 1;
        while !self.check_collision(0, y) {
            y += 1;
        }
        y - 1
    }

    /// Runs after every move attempt, rotation, spawn and lock.
    fn on_tetromino_moved(&mut self) {
        if self.config.shadow {
            self.shadow_gap = self.free_rows_below();
        }
        self.state_changed = true;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup in tools and tests.
    ///
    /// Call [`refresh`](Self::refresh) afterwards so the shadow stays in sync.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Mutable falling piece access for scenario setup in tools and tests.
    pub fn falling_mut(&mut self) -> &mut Tetromino {
        &mut self.falling
    }

    /// Recompute derived state after external edits.
    pub fn refresh(&mut self) {
        self.on_tetromino_moved();
    }

    pub fn falling(&self) -> &Tetromino {
        &self.falling
    }

    /// The preview piece (its position is meaningless)
    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn status(&self) -> GameStatus {
        if self.over {
            GameStatus::Over
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn show_shadow(&self) -> bool {
        self.show_shadow
    }

    /// Rows between the falling piece and its landing position
    pub fn shadow_gap(&self) -> i32 {
        self.shadow_gap
    }

    pub fn fall_delay_ms(&self) -> u32 {
        self.fall_delay
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn state_changed(&self) -> bool {
        self.state_changed
    }

    /// Clear the "state changed" flag after a render.
    pub fn clear_state_changed(&mut self) {
        self.state_changed = false;
    }

    /// Read and clear the "state changed" flag.
    pub fn take_state_changed(&mut self) -> bool {
        std::mem::replace(&mut self.state_changed, false)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.cells();
        out.falling = self.falling;
        out.next = self.next;
        out.stats = self.stats;
        out.shadow_gap = self.shadow_gap;
        out.show_preview = self.show_preview;
        out.show_shadow = self.config.shadow && self.show_shadow;
        out.paused = self.paused;
        out.game_over = self.over;
        out.fall_delay_ms = self.fall_delay;
        out.error_code = self.error_code;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
