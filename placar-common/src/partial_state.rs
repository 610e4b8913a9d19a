//! Rebuilding a [`MatchState`] from untrusted, possibly partial data.
//!
//! Whatever reads the stored record (JSON today) only has to map each scalar it
//! finds onto a [`LooseValue`]. The merge itself never fails: every field that is
//! missing or unusable keeps its default, and every number is clamped into range.

use crate::{
    bundles::TeamBundle,
    match_state::{
        MatchState, Team, clamp_score, clamp_timer, default_state, int_from_f64, int_from_str,
        sanitize_name,
    },
    side::Side,
};

/// A single scalar of unknown type. Arrays and objects collapse into `Composite`,
/// which only matters for truthiness.
#[derive(Debug, PartialEq, Clone)]
pub enum LooseValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Composite,
}

impl LooseValue {
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Int(i) => *i,
            Self::Float(f) => int_from_f64(*f),
            Self::Text(s) => int_from_str(s),
            Self::Null | Self::Bool(_) | Self::Composite => 0,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Composite => true,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct PartialTeam {
    pub name: Option<LooseValue>,
    pub score: Option<LooseValue>,
    pub badge: Option<LooseValue>,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct PartialMatchState {
    pub teams: TeamBundle<Option<PartialTeam>>,
    pub period: Option<LooseValue>,
    pub timer_seconds: Option<LooseValue>,
    pub running: Option<LooseValue>,
    pub swapped: Option<LooseValue>,
}

fn present(value: &Option<LooseValue>) -> Option<&LooseValue> {
    value.as_ref().filter(|v| !v.is_null())
}

fn merge_team(side: Side, partial: Option<&PartialTeam>) -> Team {
    let mut team = Team::default_for(side);
    let Some(partial) = partial else {
        return team;
    };

    if let Some(LooseValue::Text(name)) = present(&partial.name) {
        team.name = sanitize_name(name);
    }
    team.score = clamp_score(present(&partial.score).map_or(0, LooseValue::as_int));
    if let Some(badge) = present(&partial.badge).and_then(|b| match b {
        LooseValue::Text(s) => s.chars().next(),
        _ => None,
    }) {
        team.badge = badge;
    }

    team
}

impl MatchState {
    pub fn from_partial(partial: &PartialMatchState) -> Self {
        let mut state = default_state();

        state.teams = TeamBundle::new(
            merge_team(Side::A, partial.teams.a.as_ref()),
            merge_team(Side::B, partial.teams.b.as_ref()),
        );

        match present(&partial.period) {
            Some(LooseValue::Text(period)) => state.period = period.clone(),
            Some(LooseValue::Int(i)) => state.period = i.to_string(),
            Some(LooseValue::Float(f)) => state.period = f.to_string(),
            _ => {}
        }

        state.timer_seconds =
            clamp_timer(present(&partial.timer_seconds).map_or(0, LooseValue::as_int));
        state.running = partial.running.as_ref().is_some_and(LooseValue::is_truthy);
        state.swapped = partial.swapped.as_ref().is_some_and(LooseValue::is_truthy);

        state
    }
}
