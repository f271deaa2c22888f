use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    config::{ConfigError, GameConfig},
    direction::Direction,
    snapshot::Snapshot,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// What the host should do with its tick timer after an engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleDirective {
    /// Leave the current schedule alone
    Keep,
    /// Stop ticking
    Cancel,
    /// Drop the current schedule and tick at this interval from now on
    Rearm(Duration),
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    pub schedule: ScheduleDirective,
    /// State after the tick; `None` when the tick was ignored
    pub snapshot: Option<Snapshot>,
}

impl TickOutcome {
    fn ignored() -> Self {
        Self {
            ate_food: false,
            collision: None,
            schedule: ScheduleDirective::Keep,
            snapshot: None,
        }
    }

    /// Whether this tick ended the game
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
///
/// The engine holds only the rules and the random source. Every operation
/// borrows the [`GameState`] it acts on, and timer side effects come back as
/// [`ScheduleDirective`]s for the host to carry out.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State before any game has been started
    pub fn idle(&self) -> GameState {
        GameState::idle(&self.config)
    }

    /// Start a fresh game
    ///
    /// The host must drop whatever tick schedule it had and arm a new one at
    /// [`GameState::tick_interval`].
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start, Direction::Right);
        let mut state = GameState::new(snake, Position::default(), &self.config);
        self.place_food(&mut state);

        info!(food_x = state.food.x, food_y = state.food.y, "game started");
        state
    }

    /// Put the food on a random cell
    ///
    /// Each axis is drawn uniformly. With `food_avoids_snake` set, draws that
    /// land on the snake are repeated as long as a free cell remains.
    pub fn place_food(&mut self, state: &mut GameState) {
        let cells = self.config.cells_per_side();
        let has_free_cell = state.snake.occupied_cells() < (cells * cells) as usize;

        loop {
            let pos = Position::new(
                self.rng.gen_range(0..cells) * self.config.cell_size,
                self.rng.gen_range(0..cells) * self.config.cell_size,
            );

            if self.config.food_avoids_snake && has_free_cell && state.is_occupied_by_snake(pos) {
                continue;
            }

            state.food = pos;
            return;
        }
    }

    /// Steer the snake; returns whether the request was applied
    ///
    /// Reversals and requests outside a running game are ignored.
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if !state.is_running() || state.snake.direction.is_opposite(requested) {
            return false;
        }

        if state.snake.direction != requested {
            debug!(from = ?state.snake.direction, to = ?requested, "turn");
        }
        state.snake.direction = requested;
        true
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&self, state: &mut GameState) -> ScheduleDirective {
        match state.status {
            GameStatus::Running => {
                state.status = GameStatus::Paused;
                info!(score = state.score, "paused");
                ScheduleDirective::Cancel
            }
            GameStatus::Paused => {
                state.status = GameStatus::Running;
                info!(speed_ms = state.speed_ms, "resumed");
                ScheduleDirective::Rearm(state.tick_interval())
            }
            GameStatus::Idle | GameStatus::GameOver => ScheduleDirective::Keep,
        }
    }

    /// Execute one step of the game
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::ignored();
        }

        let new_head = state.snake.advance(self.config.cell_size);
        state.ticks += 1;

        if let Some(collision) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver;
            info!(
                score = state.score,
                ticks = state.ticks,
                ?collision,
                "game over"
            );

            return TickOutcome {
                ate_food: false,
                collision: Some(collision),
                schedule: ScheduleDirective::Cancel,
                snapshot: Some(state.snapshot()),
            };
        }

        let ate_food = new_head == state.food;
        let mut schedule = ScheduleDirective::Keep;

        if ate_food {
            state.score += self.config.food_score;
            state.snake.grow();
            self.place_food(state);
            state.speed_ms = state
                .speed_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_speed_ms);
            schedule = ScheduleDirective::Rearm(state.tick_interval());

            info!(
                score = state.score,
                length = state.snake.len(),
                speed_ms = state.speed_ms,
                "food eaten"
            );
        }

        debug!(x = new_head.x, y = new_head.y, tick = state.ticks, "tick");

        TickOutcome {
            ate_food,
            collision: None,
            schedule,
            snapshot: Some(state.snapshot()),
        }
    }

    /// Check if the head, already moved, has left the board or hit the body
    fn check_collision(&self, state: &GameState, head: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
