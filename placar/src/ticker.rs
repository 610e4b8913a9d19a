use log::*;
use std::{collections::HashMap, fmt};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Duration, Instant, MissedTickBehavior, interval_at},
};

/// Identifies one repeating tick source. Every tick carries the id of the source
/// that produced it, so ticks from a cancelled source can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait TickScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TickId;
    fn cancel(&mut self, id: TickId);
}

/// Runs each tick source as a tokio task. Ticks are delivered through the channel
/// returned by [`TokioTicker::new`].
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<TickId>,
    tasks: HashMap<TickId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTicker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_id: 0,
            },
            rx,
        )
    }
}

impl TickScheduler for TokioTicker {
    fn schedule_repeating(&mut self, interval: Duration) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(id).is_err() {
                    debug!("Tick receiver for source {id} is gone, stopping");
                    break;
                }
            }
        });

        debug!("Scheduled tick source {id} every {interval:?}");
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TickId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            debug!("Cancelled tick source {id}");
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
pub use manual::ManualTicker;
