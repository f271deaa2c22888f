use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use super::TickSchedule;
use crate::game::{GameEngine, GameState, GameStatus, ScheduleDirective};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{BoardView, Renderer, TerminalRenderer};

type StderrRenderer = TerminalRenderer<CrosstermBackend<Stderr>>;

/// Interactive play in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        let state = engine.idle();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let mut renderer = TerminalRenderer::new(terminal, BoardView::new(self.engine.config()));
        info!("terminal session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut renderer).await;

        let cleanup = self.cleanup_terminal(&mut renderer);
        info!(
            games = self.metrics.games_played,
            best = self.metrics.high_score,
            "terminal session ended"
        );

        finish_session(result, cleanup)
    }

    async fn run_game_loop(&mut self, renderer: &mut StderrRenderer) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut schedule = TickSchedule::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            let directive = tokio::select! {
                // Key presses are applied whole, between ticks
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::from(err).context("Failed to read terminal event"));
                        }
                        None => {
                            self.should_quit = true;
                            ScheduleDirective::Keep
                        }
                    }
                }

                // Game logic tick, at whatever interval the engine last asked for
                _ = schedule.wait() => self.update_game(renderer)?,

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    renderer.present(&self.state.snapshot(), &self.metrics)?;
                    ScheduleDirective::Keep
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                    ScheduleDirective::Keep
                }
            };

            schedule.apply(directive);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> ScheduleDirective {
        let Event::Key(key) = event else {
            return ScheduleDirective::Keep;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return ScheduleDirective::Keep;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.engine.set_direction(&mut self.state, direction);
                ScheduleDirective::Keep
            }
            KeyAction::TogglePause => {
                let directive = self.engine.toggle_pause(&mut self.state);
                match self.state.status {
                    GameStatus::Paused => self.metrics.on_pause(),
                    GameStatus::Running => self.metrics.on_resume(),
                    GameStatus::Idle | GameStatus::GameOver => {}
                }
                directive
            }
            KeyAction::StartOrRestart => self.reset_game(),
            KeyAction::Quit => {
                self.should_quit = true;
                ScheduleDirective::Keep
            }
            KeyAction::None => ScheduleDirective::Keep,
        }
    }

    /// Run one engine tick and show its snapshot straight away, so moves
    /// appear without waiting for the next render frame
    fn update_game<R: Renderer>(&mut self, renderer: &mut R) -> Result<ScheduleDirective> {
        let outcome = self.engine.tick(&mut self.state);

        if outcome.terminated() {
            self.metrics.on_game_over(self.state.score);
        }

        if let Some(snapshot) = &outcome.snapshot {
            self.metrics.update();
            renderer.present(snapshot, &self.metrics)?;
        }

        Ok(outcome.schedule)
    }

    fn reset_game(&mut self) -> ScheduleDirective {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        ScheduleDirective::Rearm(self.state.tick_interval())
    }

    fn cleanup_terminal(&mut self, renderer: &mut StderrRenderer) -> Result<()> {
        let terminal = renderer.terminal_mut();
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// The game loop's result wins; a failed terminal restore is only logged
fn finish_session(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    if let Err(err) = cleanup {
        tracing::error!(?err, "failed to restore terminal");
    }
    result
}
