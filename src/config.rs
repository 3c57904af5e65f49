use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default board side length.
pub const DEFAULT_BOARD_SIZE: u16 = 10;

/// Smallest playable board side length.
pub const MIN_BOARD_SIZE: u16 = 2;

/// Largest board side length the terminal host will draw.
pub const MAX_BOARD_SIZE: u16 = 64;

/// Default chance that freshly spawned food reverses the snake.
pub const DEFAULT_REVERSAL_PROBABILITY: f64 = 0.3;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Cell offset of the first food from the snake's starting cell.
pub const INITIAL_FOOD_OFFSET: usize = 5;

/// Tunable game parameters.
///
/// Deserializes from the settings file with every field optional.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GameConfig {
    pub board_size: u16,
    pub reversal_probability: f64,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            reversal_probability: DEFAULT_REVERSAL_PROBABILITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Checks that every value lies in its playable range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize {
                got: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        if !(0.0..=1.0).contains(&self.reversal_probability) {
            return Err(ConfigError::ReversalProbability(self.reversal_probability));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        Ok(self)
    }

    /// Returns the tick interval as a duration.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Glyph for an empty board cell (two columns wide, like every cell glyph).
pub const GLYPH_EMPTY: &str = "· ";

/// Glyph for a snake body cell.
pub const GLYPH_SNAKE: &str = "██";

/// Glyph for food of either kind.
pub const GLYPH_FOOD: &str = "● ";

/// Terminal columns taken by one board cell.
pub const CELL_WIDTH: u16 = 2;

pub const COLOR_SNAKE: Color = Color::Green;
pub const COLOR_FOOD: Color = Color::Red;
pub const COLOR_REVERSING_FOOD: Color = Color::Magenta;
pub const COLOR_EMPTY: Color = Color::DarkGray;
pub const COLOR_BORDER: Color = Color::White;

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BOARD_SIZE, GameConfig, MAX_BOARD_SIZE};
    use crate::error::ConfigError;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(config));
        assert_eq!(config.board_size, DEFAULT_BOARD_SIZE);
        assert_eq!(config.tick_interval().as_millis(), 150);
    }

    #[test]
    fn board_size_outside_range_is_rejected() {
        for board_size in [0, 1, MAX_BOARD_SIZE + 1] {
            let config = GameConfig {
                board_size,
                ..GameConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::BoardSize { got, .. }) if got == board_size
            ));
        }
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        for reversal_probability in [-0.1, 1.5, f64::NAN] {
            let config = GameConfig {
                reversal_probability,
                ..GameConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ReversalProbability(_))
            ));
        }
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::TickInterval));
    }
}
