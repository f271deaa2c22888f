use anyhow::{Context, Result};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Renderer;
use crate::game::{GameConfig, GameStatus, Position, Snapshot};
use crate::metrics::GameMetrics;

/// Lays a snapshot out as header, board and footer on a ratatui frame
pub struct BoardView {
    cells_per_side: i32,
    cell_size: i32,
}

impl BoardView {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cells_per_side: config.cells_per_side(),
            cell_size: config.cell_size,
        }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = match snapshot.status {
            GameStatus::Idle => self.render_idle(),
            GameStatus::Running | GameStatus::Paused => self.render_grid(snapshot),
            GameStatus::GameOver => self.render_game_over(snapshot),
        };
        frame.render_widget(board, board_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for row in 0..self.cells_per_side {
            let mut spans = Vec::new();

            for col in 0..self.cells_per_side {
                let pos = Position::new(col * self.cell_size, row * self.cell_size);

                let cell = if Some(pos) == snapshot.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = if snapshot.status == GameStatus::Paused {
            (" Snake (paused) ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_idle(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let report = snapshot.final_score_text().unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                report,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to replay or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" move | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("Enter", key),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Draws snapshots onto a ratatui terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    view: BoardView,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, view: BoardView) -> Self {
        Self { terminal, view }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn present(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()> {
        let view = &self.view;
        self.terminal
            .draw(|frame| view.render(frame, snapshot, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}
