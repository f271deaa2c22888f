use std::time::{Duration, Instant};

/// Session bookkeeping shown next to the board
///
/// The clock only runs while a game is being played: pausing freezes it and
/// a finished game keeps its final time on screen.
pub struct GameMetrics {
    started_at: Option<Instant>,
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked + self.started_at.map_or(Duration::ZERO, |t| t.elapsed());
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.started_at = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.stop_clock();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    fn stop_clock(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.banked += started.elapsed();
        }
        self.elapsed_time = self.banked;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
