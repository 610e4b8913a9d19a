use crate::ticker::{TickId, TickScheduler};
use log::*;
use tokio::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockState {
    Stopped,
    Running { source: TickId },
}

impl std::default::Default for ClockState {
    fn default() -> Self {
        ClockState::Stopped
    }
}

/// Owns the one repeating tick source that drives the match timer. At most one
/// source exists at a time and it exists exactly while the clock is running.
#[derive(Debug)]
pub struct Clock<S> {
    scheduler: S,
    state: ClockState,
}

impl<S: TickScheduler> Clock<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: ClockState::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self.state {
            ClockState::Running { .. } => true,
            ClockState::Stopped => false,
        }
    }

    // Returns true if the clock was started, false if it was already running
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let source = self.scheduler.schedule_repeating(TICK_INTERVAL);
        trace!("Clock started with tick source {source}");
        self.state = ClockState::Running { source };
        true
    }

    // Returns true if the clock was stopped, false if it was already stopped
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            ClockState::Running { source } => {
                self.scheduler.cancel(source);
                trace!("Clock stopped, tick source {source} cancelled");
                true
            }
            ClockState::Stopped => false,
        }
    }

    /// Whether a tick from `id` should advance the timer
    pub fn accepts(&self, id: TickId) -> bool {
        self.state == ClockState::Running { source: id }
    }

    #[cfg(test)]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
