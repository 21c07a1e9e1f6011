// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Persistent user preferences.
//!
//! The preferences file is a small JSON document holding the last opened
//! music folder and the volume level. It is read once at startup and
//! rewritten in full every time either value changes.
//!
//! A missing or malformed file is never an error, the defaults are used
//! instead. Each known key is read on its own, so one value of the wrong
//! type only loses that value. Keys this application does not know about
//! are kept and written back untouched.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use thiserror::Error;
use tracing::{debug, warn};

pub(crate) const DEFAULT_VOLUME: i64 = 100;

#[derive(Debug, Error)]
pub(crate) enum PreferencesError {
    #[error("failed to serialise preferences: {0}")]
    Serialise(#[from] serde_json::Error),

    #[error("failed to write preferences to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Preferences {
    pub(crate) last_folder: String,
    /// Stored as found, the playback controller clamps it before use.
    pub(crate) volume: i64,

    #[serde(flatten)]
    pub(crate) other: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_folder: String::new(),
            volume: DEFAULT_VOLUME,
            other: Map::new(),
        }
    }
}

impl Preferences {
    /// Takes the known keys out of a parsed document, keeping the default
    /// for any that are missing or of the wrong type.
    fn from_document(mut document: Map<String, Value>) -> Self {
        let mut preferences = Self::default();

        match document.remove("last_folder") {
            Some(Value::String(folder)) => preferences.last_folder = folder,
            Some(value) => warn!(%value, "Ignoring invalid last_folder preference"),
            None => {}
        }

        if let Some(value) = document.remove("volume") {
            match value.as_f64() {
                Some(volume) => preferences.volume = volume.round() as i64,
                None => warn!(%value, "Ignoring invalid volume preference"),
            }
        }

        preferences.other = document;
        preferences
    }
}

/// Owns the preferences document and the file it is persisted to.
#[derive(Debug)]
pub(crate) struct PreferencesStore {
    path: PathBuf,
    preferences: Preferences,
}

impl PreferencesStore {
    /// Loads the preferences at `path`, falling back to defaults when the
    /// file is missing, unreadable or not valid JSON.
    pub(crate) fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let preferences = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(document)) => Preferences::from_document(document),
                Ok(_) => {
                    warn!(path = %path.display(), "Ignoring preferences file that is not a JSON object");
                    Preferences::default()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed preferences file");
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preferences file, using defaults");
                Preferences::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unable to read preferences file");
                Preferences::default()
            }
        };

        Self { path, preferences }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub(crate) fn last_folder(&self) -> Option<&Path> {
        let folder = self.preferences.last_folder.as_str();
        (!folder.is_empty()).then(|| Path::new(folder))
    }

    pub(crate) fn volume(&self) -> i64 {
        self.preferences.volume
    }

    pub(crate) fn set_last_folder(&mut self, folder: &Path) -> Result<(), PreferencesError> {
        self.preferences.last_folder = folder.to_string_lossy().into_owned();
        self.save()
    }

    pub(crate) fn set_volume(&mut self, volume: u32) -> Result<(), PreferencesError> {
        self.preferences.volume = i64::from(volume);
        self.save()
    }

    /// Overwrites the preferences file with the current document.
    pub(crate) fn save(&self) -> Result<(), PreferencesError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.preferences.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|source| PreferencesError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferencesStore {
        PreferencesStore::load(dir.path().join("config.json"))
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.preferences(), &Preferences::default());
        assert_eq!(store.volume(), 100);
        assert!(store.last_folder().is_none());
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "{ not json").unwrap();

        let store = store_in(&dir);
        assert_eq!(store.preferences(), &Preferences::default());
    }

    #[test]
    fn partial_file_is_merged_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "last_folder": "/music" }"#).unwrap();

        let store = store_in(&dir);
        assert_eq!(store.last_folder(), Some(Path::new("/music")));
        assert_eq!(store.volume(), 100);
    }

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();

        let mut store = store_in(&dir);
        store.preferences.last_folder = "/x".to_string();
        store.set_volume(42).unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.preferences(), store.preferences());
        assert_eq!(reloaded.last_folder(), Some(Path::new("/x")));
        assert_eq!(reloaded.volume(), 42);
    }

    #[test]
    fn volume_is_not_clamped_on_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "volume": 250 }"#).unwrap();

        assert_eq!(store_in(&dir).volume(), 250);
    }

    #[test]
    fn fractional_volume_keeps_the_rest_of_the_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "last_folder": "/music", "volume": 42.0 }"#)
            .unwrap();

        let store = store_in(&dir);
        assert_eq!(store.last_folder(), Some(Path::new("/music")));
        assert_eq!(store.volume(), 42);
    }

    #[test]
    fn invalid_values_fall_back_one_key_at_a_time() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "last_folder": "/music", "volume": "loud" }"#)
            .unwrap();

        let store = store_in(&dir);
        assert_eq!(store.last_folder(), Some(Path::new("/music")));
        assert_eq!(store.volume(), 100);

        fs::write(dir.path().join("config.json"), r#"{ "last_folder": 7, "volume": -5 }"#).unwrap();

        let store = store_in(&dir);
        assert!(store.last_folder().is_none());
        assert_eq!(store.volume(), -5);
    }

    #[test]
    fn non_object_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "[1, 2, 3]").unwrap();

        assert_eq!(store_in(&dir).preferences(), &Preferences::default());
    }

    #[test]
    fn unknown_keys_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "volume": 10, "theme": "green" }"#).unwrap();

        let mut store = store_in(&dir);
        store.set_last_folder(Path::new("/albums")).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "green");
        assert_eq!(saved["volume"], 10);
        assert_eq!(saved["last_folder"], "/albums");
    }

    #[test]
    fn saved_file_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n    \"last_folder\": \"\""));
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut store = PreferencesStore::load(dir.path().join("missing").join("config.json"));

        let err = store.set_volume(10).unwrap_err();
        assert!(matches!(err, PreferencesError::Write { .. }));
        assert_eq!(store.volume(), 10);
    }
}
