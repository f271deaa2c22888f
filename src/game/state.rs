use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{config::GameConfig, direction::Direction, snapshot::Snapshot};

/// A position on the board, in board units (multiples of the cell size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// A straight snake of `length` segments trailing behind `head`
    pub fn with_length(
        head: Position,
        direction: Direction,
        length: usize,
        cell_size: i32,
    ) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * cell_size, -dy * cell_size);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Translate the snake one cell along its direction, keeping its length
    pub fn advance(&mut self, cell_size: i32) -> Position {
        let new_head = self.head().stepped(self.direction, cell_size);
        self.body.insert(0, new_head);
        self.body.pop();
        new_head
    }

    /// Add one segment on top of the tail; the next `advance` trims the
    /// segment underneath it, so the extra length stays.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Number of distinct cells under the snake; a fresh growth segment
    /// shares its cell with the tail
    pub fn occupied_cells(&self) -> usize {
        self.body.iter().collect::<HashSet<_>>().len()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Nothing started yet
    Idle,
    Running,
    Paused,
    /// Terminal until the next reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub board_size: i32,
    pub cell_size: i32,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub status: GameStatus,
    /// Ticks executed since the last reset
    pub ticks: u32,
}

impl GameState {
    /// Create a running game state with a fresh score and the initial speed
    pub fn new(snake: Snake, food: Position, config: &GameConfig) -> Self {
        Self {
            snake,
            food,
            board_size: config.board_size,
            cell_size: config.cell_size,
            score: 0,
            speed_ms: config.initial_speed_ms,
            status: GameStatus::Running,
            ticks: 0,
        }
    }

    /// The state shown before the first game starts
    pub fn idle(config: &GameConfig) -> Self {
        let snake = Snake::new(config.start, Direction::Right);
        Self {
            status: GameStatus::Idle,
            ..Self::new(snake, Position::default(), config)
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.board_size).contains(&pos.x) && (0..self.board_size).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Interval the host should tick at
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Immutable view of the state for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            speed_ms: self.speed_ms,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_by(20, 0), Position::new(120, 100));
        assert_eq!(pos.stepped(Direction::Left, 20), Position::new(80, 100));
        assert_eq!(pos.stepped(Direction::Up, 20), Position::new(100, 80));
        assert_eq!(pos.stepped(Direction::Down, 20), Position::new(100, 120));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::with_length(Position::new(100, 100), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(100, 100));
        assert_eq!(snake.body[1], Position::new(80, 100));
        assert_eq!(snake.tail(), Position::new(60, 100));
    }

    #[test]
    fn test_snake_advance_and_grow() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right);

        let head = snake.advance(20);
        assert_eq!(head, Position::new(120, 100));
        assert_eq!(snake.len(), 1);

        // Growth stacks a segment on the tail until the next move
        snake.grow();
        assert_eq!(snake.body, vec![Position::new(120, 100), Position::new(120, 100)]);

        snake.advance(20);
        assert_eq!(snake.body, vec![Position::new(140, 100), Position::new(120, 100)]);
    }

    #[test]
    fn test_occupied_cells_ignores_growth_segment() {
        let mut snake = Snake::with_length(Position::new(100, 100), Direction::Right, 3, 20);
        assert_eq!(snake.occupied_cells(), 3);

        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.occupied_cells(), 3);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::with_length(Position::new(100, 100), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Position::new(100, 100))); // head
        assert!(snake.collides_with_body(Position::new(80, 100))); // body
        assert!(!snake.collides_with_body(Position::new(200, 200))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::idle(&GameConfig::default());

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(380, 380)));
        assert!(!state.is_in_bounds(Position::new(-20, 100)));
        assert!(!state.is_in_bounds(Position::new(400, 100)));
        assert!(!state.is_in_bounds(Position::new(100, 400)));
    }

    #[test]
    fn test_idle_state() {
        let state = GameState::idle(&GameConfig::default());
        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.snake.head(), Position::new(100, 100));
        assert!(!state.is_paused());
        assert!(!state.is_game_over());
    }
}
