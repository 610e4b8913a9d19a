use crate::{
    bundles::TeamBundle,
    match_state::{MatchState, Team},
};
use derivative::Derivative;

#[derive(Derivative)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ClockStatus {
    Running,
    #[derivative(Default)]
    Stopped,
}

impl ClockStatus {
    pub fn from_running(running: bool) -> Self {
        if running { Self::Running } else { Self::Stopped }
    }

    /// Label for the single start/pause control
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Running => "Pausar",
            Self::Stopped => "Iniciar",
        }
    }
}

impl core::fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Running => write!(f, "RODANDO"),
            Self::Stopped => write!(f, "PARADO"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BoardTeam {
    pub name: String,
    pub score: u8,
    pub badge: String,
}

impl From<&Team> for BoardTeam {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.to_uppercase(),
            score: team.score,
            badge: team.badge.to_uppercase().to_string(),
        }
    }
}

/// What the public display shows. `left` and `right` follow the swap flag.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BoardView {
    pub left: BoardTeam,
    pub right: BoardTeam,
    pub period: String,
    pub timer_text: String,
    pub status: ClockStatus,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AdminTeam {
    /// Unmodified name, suitable for an editable field
    pub name: String,
    pub label: String,
    pub score: u8,
}

impl From<&Team> for AdminTeam {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            label: team.name.to_uppercase(),
            score: team.score,
        }
    }
}

/// What the control panel shows. Always team A then team B, whatever the swap flag says.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AdminView {
    pub teams: TeamBundle<AdminTeam>,
    pub timer_text: String,
    pub status: ClockStatus,
    pub toggle_label: &'static str,
}

/// `MM:SS`, minutes grow past two digits when they need to
pub fn format_time(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

impl MatchState {
    pub fn board_view(&self) -> BoardView {
        let (left, right) = self.teams.ordered(self.swapped);
        BoardView {
            left: left.into(),
            right: right.into(),
            period: self.period.clone(),
            timer_text: format_time(self.timer_seconds),
            status: ClockStatus::from_running(self.running),
        }
    }

    pub fn admin_view(&self) -> AdminView {
        let status = ClockStatus::from_running(self.running);
        AdminView {
            teams: self.teams.map(AdminTeam::from),
            timer_text: format_time(self.timer_seconds),
            status,
            toggle_label: status.toggle_label(),
        }
    }
}
