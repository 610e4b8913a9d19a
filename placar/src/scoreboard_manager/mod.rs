use crate::{
    persistence::{KeyValueStore, PersistenceStore},
    ticker::{TickId, TickScheduler},
};
use enum_iterator::all;
use log::*;
use placar_common::{
    limits::{MAX_SET_MINUTES, MAX_SET_SECONDS},
    match_state::{
        MatchState, clamp_int, clamp_score, clamp_timer, default_name, default_state,
        sanitize_name,
    },
    side::Side,
    views::format_time,
};

mod clock;
use clock::Clock;

const SECS_PER_MIN: u32 = 60;

/// Owns the match for the lifetime of the app. Every change goes through one of the
/// commands below, each of which saves the match and hands back a snapshot of it.
///
/// `running` on the match always mirrors whether the clock has a live tick source.
#[derive(Debug)]
pub struct ScoreboardManager<K, S> {
    state: MatchState,
    store: PersistenceStore<K>,
    clock: Clock<S>,
}

impl<K: KeyValueStore, S: TickScheduler> ScoreboardManager<K, S> {
    pub fn new(store: PersistenceStore<K>, scheduler: S) -> Self {
        let state = store.load();
        let mut manager = Self {
            state,
            store,
            clock: Clock::new(scheduler),
        };

        if manager.state.running {
            info!(
                "{} Saved match was running, resuming the clock",
                manager.status_string()
            );
            manager.clock.start();
        }
        manager.commit();
        manager
    }

    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    #[cfg(test)]
    fn clock_is_running(&self) -> bool {
        self.clock.is_running()
    }

    fn commit(&mut self) -> MatchState {
        self.state.running = self.clock.is_running();
        self.store.save(&self.state);
        trace!("Generating snapshot");
        self.snapshot()
    }

    fn status_string(&self) -> String {
        format!(
            "[{} {}]",
            format_time(self.state.timer_seconds),
            self.state.period
        )
    }

    pub fn adjust_score(&mut self, side: Side, delta: i64) -> MatchState {
        let team = &mut self.state.teams[side];
        team.score = clamp_score(i64::from(team.score).saturating_add(delta));
        info!(
            "{} Score of team {side} adjusted by {delta}, scores are now {}",
            self.status_string(),
            self.state.teams.map(|t| t.score)
        );
        self.commit()
    }

    pub fn set_period(&mut self, label: &str) -> MatchState {
        self.state.period = label.to_string();
        info!("{} Period set", self.status_string());
        self.commit()
    }

    /// An empty name is kept as is, only [`Self::reset_names`] brings back the defaults
    pub fn set_name(&mut self, side: Side, raw: &str) -> MatchState {
        let name = sanitize_name(raw);
        info!("{} Team {side} renamed to {name:?}", self.status_string());
        self.state.teams[side].name = name;
        self.commit()
    }

    pub fn swap_display(&mut self) -> MatchState {
        self.state.swapped = !self.state.swapped;
        info!(
            "{} Board display {}",
            self.status_string(),
            if self.state.swapped {
                "swapped"
            } else {
                "restored"
            }
        );
        self.commit()
    }

    pub fn reset_names(&mut self) -> MatchState {
        for side in all::<Side>() {
            self.state.teams[side].name = default_name(side).to_string();
        }
        info!("{} Team names reset", self.status_string());
        self.commit()
    }

    pub fn reset_scores(&mut self) -> MatchState {
        for side in all::<Side>() {
            self.state.teams[side].score = 0;
        }
        info!("{} Scores reset", self.status_string());
        self.commit()
    }

    pub fn reset_all(&mut self) -> MatchState {
        info!("{} Resetting the whole match", self.status_string());
        self.clock.stop();
        self.state = default_state();
        self.commit()
    }

    pub fn set_timer(&mut self, minutes: i64, seconds: i64) -> MatchState {
        let minutes = clamp_int(minutes, 0, MAX_SET_MINUTES);
        let seconds = clamp_int(seconds, 0, MAX_SET_SECONDS);
        self.state.timer_seconds = clamp_timer(minutes * i64::from(SECS_PER_MIN) + seconds);
        info!("{} Timer set", self.status_string());
        self.commit()
    }

    // Only the lower bound applies here, unlike `set_timer`
    pub fn add_minute(&mut self) -> MatchState {
        self.state.timer_seconds = self.state.timer_seconds.saturating_add(SECS_PER_MIN);
        info!("{} Added a minute", self.status_string());
        self.commit()
    }

    pub fn sub_minute(&mut self) -> MatchState {
        self.state.timer_seconds = self.state.timer_seconds.saturating_sub(SECS_PER_MIN);
        info!("{} Removed a minute", self.status_string());
        self.commit()
    }

    pub fn zero_timer(&mut self) -> MatchState {
        self.state.timer_seconds = 0;
        if self.clock.stop() {
            info!("{} Timer zeroed, clock stopped", self.status_string());
        } else {
            info!("{} Timer zeroed", self.status_string());
        }
        self.commit()
    }

    /// Does nothing if the clock is already running
    pub fn start_clock(&mut self) -> MatchState {
        if !self.clock.start() {
            debug!("{} Clock already running", self.status_string());
            return self.snapshot();
        }
        info!("{} Starting the clock", self.status_string());
        self.commit()
    }

    /// Does nothing if the clock is already paused
    pub fn pause_clock(&mut self) -> MatchState {
        if !self.clock.stop() {
            debug!("{} Clock already paused", self.status_string());
            return self.snapshot();
        }
        info!("{} Pausing the clock", self.status_string());
        self.commit()
    }

    pub fn toggle_clock(&mut self) -> MatchState {
        if self.clock.is_running() {
            self.pause_clock()
        } else {
            self.start_clock()
        }
    }

    /// Unlike `pause_clock`, always saves, even when the clock was not running
    pub fn stop_clock(&mut self) -> MatchState {
        if self.clock.stop() {
            info!("{} Stopping the clock", self.status_string());
        }
        self.commit()
    }

    /// Advances the timer by a second if `id` belongs to the live tick source.
    /// Returns `None` for a tick from a source that has since been cancelled.
    pub fn tick(&mut self, id: TickId) -> Option<MatchState> {
        if !self.clock.accepts(id) {
            debug!("Ignoring tick from stale source {id}");
            return None;
        }
        self.state.timer_seconds = self.state.timer_seconds.saturating_add(1);
        trace!("{} Tick", self.status_string());
        Some(self.commit())
    }

    #[cfg(test)]
    fn scheduler_mut(&mut self) -> &mut S {
        self.clock.scheduler_mut()
    }

    #[cfg(test)]
    fn store(&self) -> &PersistenceStore<K> {
        &self.store
    }
}
