use crate::{bundles::TeamBundle, limits::*, side::Side};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERIOD: &str = "1º";

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub score: u8,
    pub badge: char,
}

impl Team {
    pub fn default_for(side: Side) -> Self {
        Self {
            name: default_name(side).to_string(),
            score: 0,
            badge: default_badge(side),
        }
    }
}

pub fn default_name(side: Side) -> &'static str {
    match side {
        Side::A => "TIME A",
        Side::B => "TIME B",
    }
}

pub fn default_badge(side: Side) -> char {
    match side {
        Side::A => 'A',
        Side::B => 'B',
    }
}

/// The whole match as the scoreboard knows it. Field names match the persisted
/// record: `teamA`, `teamB`, `period`, `timerSeconds`, `running`, `swapped`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    #[serde(flatten)]
    pub teams: TeamBundle<Team>,
    pub period: String,
    pub timer_seconds: u32,
    pub running: bool,
    pub swapped: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        default_state()
    }
}

pub fn default_state() -> MatchState {
    MatchState {
        teams: TeamBundle::new(Team::default_for(Side::A), Team::default_for(Side::B)),
        period: DEFAULT_PERIOD.to_string(),
        timer_seconds: 0,
        running: false,
        swapped: false,
    }
}

pub fn clamp_int(value: i64, min: i64, max: i64) -> i64 {
    value.clamp(min, max)
}

pub fn clamp_score(value: i64) -> u8 {
    // In range after the clamp, the cast can't truncate
    clamp_int(value, 0, MAX_SCORE.into()) as u8
}

pub fn clamp_timer(value: i64) -> u32 {
    clamp_int(value, 0, MAX_TIMER_SECS.into()) as u32
}

/// Trims surrounding whitespace and keeps at most `MAX_NAME_CHARS` characters.
/// An all-whitespace name comes back empty, the caller picks any fallback.
pub fn sanitize_name(raw: &str) -> String {
    raw.trim().chars().take(MAX_NAME_CHARS).collect()
}

/// Non-finite values become 0, everything else is truncated toward zero.
pub fn int_from_f64(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Reads a leading decimal integer out of free text: leading whitespace and an
/// optional sign are accepted, anything after the digits is ignored. Text with no
/// leading digits reads as 0.
pub fn int_from_str(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add((d - b'0').into())
        });

    if negative { -magnitude } else { magnitude }
}
