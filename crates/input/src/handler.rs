//! Delayed auto-shift input handler for terminal environments.
//!
//! Held left/right/down keys (and optionally the clockwise rotation key)
//! repeat after an initial delay. Terminals that never report key releases are
//! supported through a release timeout.

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::map::handle_key_event;
use crate::types::{
    GameEvents, DAS_DELAY_MS, DAS_MOVE_MS, ROTATION_AUTOREPEAT_DELAY_MS, ROTATION_AUTOREPEAT_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn event(self) -> GameEvents {
        match self {
            HorizontalDirection::Left => GameEvents::MOVE_LEFT,
            HorizontalDirection::Right => GameEvents::MOVE_RIGHT,
            HorizontalDirection::None => GameEvents::empty(),
        }
    }
}

/// Delay-then-repeat timer for one held key.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    held_ms: u32,
    accumulator: u32,
}

impl RepeatTimer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats fell due.
    fn advance(&mut self, elapsed_ms: u32, delay: u32, rate: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay {
            return 0;
        }
        let excess = if prev < delay {
            self.held_ms - delay
        } else {
            elapsed_ms
        };
        self.accumulator += excess;
        let rate = rate.max(1);
        let repeats = self.accumulator / rate;
        self.accumulator %= rate;
        repeats
    }
}

/// Tracks held keys and turns them into repeated game events.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    rotate_held: bool,
    last_key_time: Instant,
    horizontal_timer: RepeatTimer,
    down_timer: RepeatTimer,
    rotate_timer: RepeatTimer,
    das_delay: u32,
    das_rate: u32,
    rotation_autorepeat: bool,
    key_release_timeout_ms: u32,
}

// Without release events a single tap must not look like a held key.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DAS_DELAY_MS, DAS_MOVE_MS)
    }

    pub fn with_config(das_delay: u32, das_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            rotate_held: false,
            last_key_time: Instant::now(),
            horizontal_timer: RepeatTimer::default(),
            down_timer: RepeatTimer::default(),
            rotate_timer: RepeatTimer::default(),
            das_delay,
            das_rate,
            rotation_autorepeat: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Repeat clockwise rotation while its key is held.
    pub fn with_rotation_autorepeat(mut self, enabled: bool) -> Self {
        self.rotation_autorepeat = enabled;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Handle a key press. Returns the events to queue right away.
    ///
    /// Presses of a key that is already held (terminal auto-repeat) only keep
    /// the key alive; the repeats come from [`update`](Self::update).
    pub fn handle_key_press(&mut self, key: KeyEvent) -> GameEvents {
        let events = handle_key_event(key);

        if events == GameEvents::MOVE_LEFT || events == GameEvents::MOVE_RIGHT {
            self.last_key_time = Instant::now();
            let direction = if events == GameEvents::MOVE_LEFT {
                HorizontalDirection::Left
            } else {
                HorizontalDirection::Right
            };
            if self.horizontal == direction {
                return GameEvents::empty();
            }
            self.horizontal = direction;
            self.horizontal_timer.reset();
            return events;
        }

        if events == GameEvents::MOVE_DOWN {
            self.last_key_time = Instant::now();
            if self.down_held {
                return GameEvents::empty();
            }
            self.down_held = true;
            self.down_timer.reset();
            return events;
        }

        if self.rotation_autorepeat && events == GameEvents::ROTATE_CW {
            self.last_key_time = Instant::now();
            if self.rotate_held {
                return GameEvents::empty();
            }
            self.rotate_held = true;
            self.rotate_timer.reset();
            return events;
        }

        events
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        let events = handle_key_event(key);
        if events == self.horizontal.event() && !events.is_empty() {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_timer.reset();
        } else if events == GameEvents::MOVE_DOWN {
            self.down_held = false;
            self.down_timer.reset();
        } else if events == GameEvents::ROTATE_CW {
            self.rotate_held = false;
            self.rotate_timer.reset();
        }
    }

    /// Advance the repeat timers by one frame and return the repeats due.
    ///
    /// Several repeats of the same key within one frame collapse into one
    /// event, matching the one-move-per-update engine.
    pub fn update(&mut self, elapsed_ms: u32) -> GameEvents {
        let mut events = GameEvents::empty();

        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.release_all();
        }

        if self.horizontal != HorizontalDirection::None
            && self
                .horizontal_timer
                .advance(elapsed_ms, self.das_delay, self.das_rate)
                > 0
        {
            events |= self.horizontal.event();
        }

        if self.down_held
            && self
                .down_timer
                .advance(elapsed_ms, self.das_delay, self.das_rate)
                > 0
        {
            events |= GameEvents::MOVE_DOWN;
        }

        if self.rotate_held
            && self.rotate_timer.advance(
                elapsed_ms,
                ROTATION_AUTOREPEAT_DELAY_MS,
                ROTATION_AUTOREPEAT_MS,
            ) > 0
        {
            events |= GameEvents::ROTATE_CW;
        }

        events
    }

    fn release_all(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.rotate_held = false;
        self.horizontal_timer.reset();
        self.down_timer.reset();
        self.rotate_timer.reset();
    }

    pub fn reset(&mut self) {
        self.release_all();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
