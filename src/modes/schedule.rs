use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::ScheduleDirective;

/// The host's single tick registration
///
/// Carries out the [`ScheduleDirective`]s the engine hands back. At most one
/// interval exists at a time; re-arming replaces it.
pub struct TickSchedule {
    interval: Option<Interval>,
}

impl TickSchedule {
    /// A schedule that never fires until armed
    pub fn new() -> Self {
        Self { interval: None }
    }

    pub fn apply(&mut self, directive: ScheduleDirective) {
        match directive {
            ScheduleDirective::Keep => {}
            ScheduleDirective::Cancel => self.interval = None,
            ScheduleDirective::Rearm(period) => {
                // First tick one full period from now, like a fresh timer
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
            }
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick; pends forever while cancelled
    pub async fn wait(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new()
    }
}
