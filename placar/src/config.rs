use crate::{app::Route, persistence::DEFAULT_SLOT_KEY};
use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub slot_key: String,
    /// Directory holding the slot files, default is platform dependent
    pub data_dir: Option<PathBuf>,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            data_dir: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub default_route: Route,
    pub clear_screen: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            default_route: Route::Board,
            clear_screen: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: Storage,
    pub display: Display,
}
