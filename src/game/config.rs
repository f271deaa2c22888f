use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Side length of the square board, in board units
pub const BOARD_SIZE: i32 = 400;
/// Side length of one grid cell, in board units
pub const CELL_SIZE: i32 = 20;
/// Tick interval at the start of a game, in milliseconds
pub const INITIAL_SPEED_MS: u64 = 200;
/// The tick interval never drops below this
pub const MIN_SPEED_MS: u64 = 50;
/// Tick interval reduction per food eaten
pub const SPEED_STEP_MS: u64 = 10;
/// Points awarded per food eaten
pub const FOOD_SCORE: u32 = 10;

/// Configuration for the game
///
/// The defaults are the fixed constants of the game; other values exist so
/// the engine can be exercised on unusual boards in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: i32,
    /// Side length of one grid cell
    pub cell_size: i32,
    /// Where the single-segment snake starts
    pub start: Position,
    /// Tick interval at game start (ms)
    pub initial_speed_ms: u64,
    /// Floor for the tick interval (ms)
    pub min_speed_ms: u64,
    /// How much faster each food makes the game (ms)
    pub speed_step_ms: u64,
    /// Points per food
    pub food_score: u32,
    /// Re-roll food that lands on the snake while a free cell exists
    pub food_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            cell_size: CELL_SIZE,
            start: Position::new(100, 100),
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            food_score: FOOD_SCORE,
            food_avoids_snake: true,
        }
    }
}

/// Reasons a [`GameConfig`] cannot drive a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCell(i32),
    #[error("board size {board} is not a positive multiple of cell size {cell}")]
    BoardNotAligned { board: i32, cell: i32 },
    #[error("start position ({x}, {y}) is not a cell inside the board")]
    BadStart { x: i32, y: i32 },
    #[error("minimum speed must be positive")]
    ZeroMinSpeed,
    #[error("minimum speed {min}ms exceeds initial speed {initial}ms")]
    MinAboveInitial { min: u64, initial: u64 },
}

impl GameConfig {
    /// Number of cells along one side of the board
    pub fn cells_per_side(&self) -> i32 {
        self.board_size / self.cell_size
    }

    /// Check that the values describe a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::NonPositiveCell(self.cell_size));
        }
        if self.board_size <= 0 || self.board_size % self.cell_size != 0 {
            return Err(ConfigError::BoardNotAligned {
                board: self.board_size,
                cell: self.cell_size,
            });
        }

        let Position { x, y } = self.start;
        let on_board = |v: i32| (0..self.board_size).contains(&v) && v % self.cell_size == 0;
        if !on_board(x) || !on_board(y) {
            return Err(ConfigError::BadStart { x, y });
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::MinAboveInitial {
                min: self.min_speed_ms,
                initial: self.initial_speed_ms,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 400);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.start, Position::new(100, 100));
        assert_eq!(config.initial_speed_ms, 200);
        assert_eq!(config.min_speed_ms, 50);
        assert_eq!(config.cells_per_side(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_misaligned_board() {
        let config = GameConfig {
            board_size: 410,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardNotAligned {
                board: 410,
                cell: 20
            })
        );
    }

    #[test]
    fn test_bad_start() {
        let off_grid = GameConfig {
            start: Position::new(105, 100),
            ..Default::default()
        };
        assert_eq!(
            off_grid.validate(),
            Err(ConfigError::BadStart { x: 105, y: 100 })
        );

        let off_board = GameConfig {
            start: Position::new(400, 0),
            ..Default::default()
        };
        assert!(matches!(
            off_board.validate(),
            Err(ConfigError::BadStart { .. })
        ));
    }

    #[test]
    fn test_speed_bounds() {
        let zero = GameConfig {
            min_speed_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroMinSpeed));

        let inverted = GameConfig {
            min_speed_ms: 300,
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::MinAboveInitial {
                min: 300,
                initial: 200
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositiveCell(0);
        assert_eq!(err.to_string(), "cell size must be positive, got 0");
    }
}
