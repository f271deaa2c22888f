//! Grid Snake - the classic Snake game on a fixed board
//!
//! This library provides:
//! - Core game logic driven by host ticks (game module)
//! - Keyboard mapping (input module)
//! - Snapshot renderers for the terminal and for JSON lines (render module)
//! - Session bookkeeping (metrics module)
//! - Interactive and headless hosts (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
