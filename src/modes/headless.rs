use anyhow::Result;
use tracing::{debug, info};

use crate::game::{GameEngine, ScheduleDirective, Snapshot};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Plays one game without a terminal or wall-clock timer
///
/// Ticks run back to back; the schedule directives only get logged. Useful
/// for scripted runs and for checking the whole loop in tests.
pub struct HeadlessMode<R: Renderer> {
    engine: GameEngine,
    renderer: R,
    metrics: GameMetrics,
    max_ticks: u32,
}

impl<R: Renderer> HeadlessMode<R> {
    pub fn new(engine: GameEngine, renderer: R, max_ticks: u32) -> Self {
        Self {
            engine,
            renderer,
            metrics: GameMetrics::new(),
            max_ticks,
        }
    }

    /// Run until the game ends or the tick budget is spent; returns the last
    /// snapshot
    pub fn run(&mut self) -> Result<Snapshot> {
        let mut state = self.engine.reset();
        self.metrics.on_game_start();
        self.renderer.present(&state.snapshot(), &self.metrics)?;

        for _ in 0..self.max_ticks {
            let outcome = self.engine.tick(&mut state);

            if let ScheduleDirective::Rearm(period) = outcome.schedule {
                debug!(period_ms = period.as_millis() as u64, "tick schedule re-armed");
            }

            self.metrics.update();
            if let Some(snapshot) = &outcome.snapshot {
                self.renderer.present(snapshot, &self.metrics)?;
            }

            if outcome.terminated() {
                self.metrics.on_game_over(state.score);
                break;
            }
        }

        let last = state.snapshot();
        info!(
            score = last.score,
            ticks = state.ticks,
            game_over = last.is_game_over(),
            "headless run finished"
        );
        Ok(last)
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
