use crate::{
    persistence::KeyValueStore,
    scoreboard_manager::ScoreboardManager,
    ticker::{TickId, TickScheduler},
};
use derivative::Derivative;
use log::*;
use placar_common::match_state::MatchState;
use serde_derive::{Deserialize, Serialize};
use std::io::{self, Write};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    select,
    sync::mpsc,
};

mod command;
use command::{Command, ResetScope};

mod render;
use render::{render_admin, render_board};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HELP: &str = "\
Clock:   start | pause | toggle (space) | stop | zero (r)
Time:    time <minutes> <seconds> | +min | -min
Score:   1 | 2 | score <a|b> <delta>
Teams:   name <a|b> [text] | swap
Match:   period <label> | reset <names|scores|all>
Views:   board | admin | route <fragment> | show | fullscreen (f)
Other:   help | quit";

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[derivative(Default)]
    Board,
    Admin,
}

impl Route {
    /// `admin` selects the admin panel, anything else selects the board.
    /// A leading `#` is ignored.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.trim();
        match fragment.strip_prefix('#').unwrap_or(fragment) {
            "admin" => Route::Admin,
            _ => Route::Board,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Board => write!(f, "board"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Render,
    Quiet,
    Quit,
}

/// Console front end. Reads one command per line and re-renders the active route
/// after every command and every tick that moved the timer.
pub struct ScoreboardApp<K, S, W> {
    manager: ScoreboardManager<K, S>,
    route: Route,
    clear_screen: bool,
    out: W,
}

impl<K: KeyValueStore, S: TickScheduler, W: Write> ScoreboardApp<K, S, W> {
    pub fn new(manager: ScoreboardManager<K, S>, route: Route, clear_screen: bool, out: W) -> Self {
        Self {
            manager,
            route,
            clear_screen,
            out,
        }
    }

    /// Runs until `quit` or the end of the input, then returns the final match.
    /// Commands and ticks are handled one at a time, in arrival order.
    pub async fn run<R: AsyncBufRead + Unpin>(
        mut self,
        input: R,
        mut ticks: mpsc::UnboundedReceiver<TickId>,
    ) -> io::Result<MatchState> {
        info!("Starting on the {} route", self.route);
        self.show()?;

        // Split on raw bytes, a line that isn't UTF-8 is just another unknown command
        let mut lines = input.split(b'\n');
        loop {
            select! {
                line = lines.next_segment() => {
                    let Some(raw) = line? else {
                        info!("Input closed");
                        break;
                    };
                    let line = String::from_utf8_lossy(&raw);
                    match self.handle_line(line.trim_end_matches('\r'))? {
                        Flow::Quit => break,
                        Flow::Render => self.show()?,
                        Flow::Quiet => {}
                    }
                }
                Some(id) = ticks.recv() => {
                    if self.manager.tick(id).is_some() {
                        self.show()?;
                    }
                }
            }
        }

        info!("Exiting");
        Ok(self.manager.snapshot())
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match line.parse::<Command>() {
            Ok(command) => self.apply(command),
            Err(e) => {
                warn!("Ignoring input {line:?}: {e}");
                eprintln!("{e}");
                Ok(Flow::Quiet)
            }
        }
    }

    fn apply(&mut self, command: Command) -> io::Result<Flow> {
        debug!("Applying {command:?}");
        let manager = &mut self.manager;
        match command {
            Command::Start => manager.start_clock(),
            Command::Pause => manager.pause_clock(),
            Command::Toggle => manager.toggle_clock(),
            Command::Stop => manager.stop_clock(),
            Command::Zero => manager.zero_timer(),
            Command::Score { side, delta } => manager.adjust_score(side, delta),
            Command::Name { side, text } => manager.set_name(side, &text),
            Command::Period(label) => manager.set_period(&label),
            Command::Swap => manager.swap_display(),
            Command::Reset(ResetScope::Names) => manager.reset_names(),
            Command::Reset(ResetScope::Scores) => manager.reset_scores(),
            Command::Reset(ResetScope::All) => manager.reset_all(),
            Command::Time { minutes, seconds } => manager.set_timer(minutes, seconds),
            Command::AddMinute => manager.add_minute(),
            Command::SubMinute => manager.sub_minute(),
            Command::Route(route) => {
                info!("Switching to the {route} route");
                self.route = route;
                return Ok(Flow::Render);
            }
            Command::Fullscreen => {
                self.clear_screen = !self.clear_screen;
                info!(
                    "Screen clearing {}",
                    if self.clear_screen { "on" } else { "off" }
                );
                return Ok(Flow::Render);
            }
            Command::Show => return Ok(Flow::Render),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Quiet);
            }
            Command::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Render)
    }

    fn show(&mut self) -> io::Result<()> {
        let snapshot = self.manager.snapshot();
        let text = match self.route {
            Route::Board => render_board(&snapshot.board_view()),
            Route::Admin => render_admin(&snapshot.admin_view()),
        };
        if self.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
