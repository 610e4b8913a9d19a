use log::*;
use placar_common::{
    bundles::TeamBundle,
    match_state::{MatchState, default_state},
    partial_state::{LooseValue, PartialMatchState, PartialTeam},
};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_SLOT_KEY: &str = "placar_pro_v1";

const SLOT_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The slot key {0:?} can't be used as a file name")]
    InvalidKey(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A medium holding named string slots. Writes replace the whole slot.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps each slot in its own `<key>.json` file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(&path)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Write beside the slot and rename over it, the slot never holds half a record
        let temp = self.dir.join(format!("{key}.{TEMP_EXTENSION}"));
        fs::write(&temp, value).map_err(io_err(&temp))?;
        fs::rename(&temp, &path).map_err(io_err(&path))
    }
}

/// Saves and restores the match in a single slot of a [`KeyValueStore`].
///
/// Neither direction ever fails from the caller's point of view: a slot that is
/// missing, unreadable or corrupt loads as the default match, and a failed write is
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct PersistenceStore<K> {
    medium: K,
    key: String,
}

impl<K: KeyValueStore> PersistenceStore<K> {
    pub fn new<S: Into<String>>(medium: K, key: S) -> Self {
        Self {
            medium,
            key: key.into(),
        }
    }

    pub fn load(&self) -> MatchState {
        let raw = match self.medium.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                info!("No saved match in slot {:?}, using defaults", self.key);
                return default_state();
            }
            Err(e) => {
                warn!("Could not read slot {:?}, using defaults. Error: {e}", self.key);
                return default_state();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => {
                debug!("Merging saved match from slot {:?}", self.key);
                MatchState::from_partial(&partial_from_json(&map))
            }
            Ok(other) => {
                warn!(
                    "Saved match in slot {:?} is not an object ({other}), using defaults",
                    self.key
                );
                default_state()
            }
            Err(e) => {
                warn!(
                    "Saved match in slot {:?} is not valid JSON, using defaults. Error: {e}",
                    self.key
                );
                default_state()
            }
        }
    }

    pub fn save(&mut self, state: &MatchState) {
        let serialized = match serde_json::to_string(state) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to serialize the match: {e}");
                return;
            }
        };
        trace!("Saving match to slot {:?}: {serialized}", self.key);
        if let Err(e) = self.medium.set(&self.key, &serialized) {
            error!("Failed to save the match to slot {:?}: {e}", self.key);
        }
    }

    #[cfg(test)]
    pub fn medium(&self) -> &K {
        &self.medium
    }

    #[cfg(test)]
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn loose(value: &Value) -> LooseValue {
    match value {
        Value::Null => LooseValue::Null,
        Value::Bool(b) => LooseValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => LooseValue::Int(i),
            None => LooseValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => LooseValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => LooseValue::Composite,
    }
}

fn partial_team(value: Option<&Value>) -> Option<PartialTeam> {
    let team = value?.as_object()?;
    Some(PartialTeam {
        name: team.get("name").map(loose),
        score: team.get("score").map(loose),
        badge: team.get("badge").map(loose),
    })
}

pub fn partial_from_json(record: &Map<String, Value>) -> PartialMatchState {
    PartialMatchState {
        teams: TeamBundle::new(
            partial_team(record.get("teamA")),
            partial_team(record.get("teamB")),
        ),
        period: record.get("period").map(loose),
        timer_seconds: record.get("timerSeconds").map(loose),
        running: record.get("running").map(loose),
        swapped: record.get("swapped").map(loose),
    }
}
