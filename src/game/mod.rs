//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timer or
//! rendering dependencies. Hosts drive it with ticks and carry out the
//! schedule directives it hands back.

pub mod config;
pub mod direction;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, ScheduleDirective, TickOutcome};
pub use snapshot::Snapshot;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
