//! Game configuration: optional rules and the starting fall speed.

use thiserror::Error;

use crate::types::INIT_DELAY_FALL_MS;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("initial fall delay must be at least 1 ms")]
    ZeroFallDelay,
}

/// Rule switches for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Push rotating pieces away from side walls instead of rejecting the rotation
    pub wall_kick: bool,
    /// Track the shadow (ghost) piece and honor the shadow toggle event
    pub shadow: bool,
    /// Honor the counter-clockwise rotation event
    pub rotate_ccw: bool,
    /// Delay between automatic falling moves at level 0
    pub initial_fall_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wall_kick: true,
            shadow: true,
            rotate_ccw: true,
            initial_fall_delay_ms: INIT_DELAY_FALL_MS,
        }
    }
}

impl GameConfig {
    pub fn with_wall_kick(mut self, enabled: bool) -> Self {
        self.wall_kick = enabled;
        self
    }

    pub fn with_shadow(mut self, enabled: bool) -> Self {
        self.shadow = enabled;
        self
    }

    pub fn with_rotate_ccw(mut self, enabled: bool) -> Self {
        self.rotate_ccw = enabled;
        self
    }

    pub fn with_initial_fall_delay_ms(mut self, delay_ms: u32) -> Self {
        self.initial_fall_delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_fall_delay_ms == 0 {
            return Err(ConfigError::ZeroFallDelay);
        }
        Ok(())
    }
}
