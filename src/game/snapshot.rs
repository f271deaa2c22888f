use serde::{Deserialize, Serialize};

use super::state::{GameStatus, Position};

/// What a renderer gets to see of a game, detached from the live state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snake segments, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub speed_ms: u64,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// The terminal score report, once the game has ended
    pub fn final_score_text(&self) -> Option<String> {
        self.is_game_over()
            .then(|| format!("Game Over! Final Score: {}", self.score))
    }
}
