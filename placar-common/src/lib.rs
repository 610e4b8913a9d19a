pub mod bundles;

pub mod side;

pub mod match_state;

pub mod partial_state;

pub mod views;

pub mod limits {
    pub const MAX_SCORE: u8 = 99;
    pub const MAX_TIMER_SECS: u32 = 60 * 999;
    pub const MAX_SET_MINUTES: i64 = 199;
    pub const MAX_SET_SECONDS: i64 = 59;
    pub const MAX_NAME_CHARS: usize = 20;
}
