//! Renderers turn engine snapshots into something a player can see.

pub mod json;
pub mod renderer;

use anyhow::Result;

use crate::game::Snapshot;
use crate::metrics::GameMetrics;

pub use json::JsonLinesRenderer;
pub use renderer::{BoardView, TerminalRenderer};

/// Anything that can show a game snapshot
pub trait Renderer {
    fn present(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()>;
}
