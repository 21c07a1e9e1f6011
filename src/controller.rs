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

//! Playback control.
//!
//! The [`PlaybackController`] owns the open playlist, the position within it
//! and the paused flag, and drives an [`AudioEngine`]. It knows nothing about
//! the terminal UI; every user action reaches it as a plain method call.
//!
//! Volume changes are persisted through the [`PreferencesStore`] the
//! controller owns.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    player::{AudioEngine, EngineStatus},
    playlist::Playlist,
    preferences::{PreferencesError, PreferencesStore},
};

/// Every track is expected to be in this format.
pub(crate) const TRACK_EXTENSION: &str = ".mp3";

const MAX_VOLUME: u32 = 100;

#[derive(Debug, Error)]
pub(crate) enum PlaybackError {
    #[error("cannot play: no track selected")]
    NoTrack,

    #[error(transparent)]
    Engine(#[from] anyhow::Error),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

pub(crate) type Result<T> = std::result::Result<T, PlaybackError>;

/// What to play, either a position in the open playlist or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlayTarget {
    Index(usize),
    Path(PathBuf),
}

pub(crate) struct PlaybackController<E: AudioEngine> {
    engine: E,
    preferences: PreferencesStore,

    playlist: Playlist,
    current_index: usize,
    is_paused: bool,

    /// The file last handed to the engine, `None` before the first play and
    /// after a stop.
    loaded: Option<PathBuf>,
}

impl<E: AudioEngine> PlaybackController<E> {
    pub(crate) fn new(engine: E, preferences: PreferencesStore) -> Self {
        Self {
            engine,
            preferences,
            playlist: Playlist::default(),
            current_index: 0,
            is_paused: false,
            loaded: None,
        }
    }

    pub(crate) fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current_index
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub(crate) fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    pub(crate) fn engine_status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// The saved volume, clamped to `0..=100`.
    pub(crate) fn volume(&self) -> u32 {
        self.preferences.volume().clamp(0, i64::from(MAX_VOLUME)) as u32
    }

    pub(crate) fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    pub(crate) fn preferences_mut(&mut self) -> &mut PreferencesStore {
        &mut self.preferences
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    /// Pushes the persisted volume to the engine.
    pub(crate) fn apply_preferences(&mut self) -> Result<()> {
        let volume = self.volume();
        self.engine.set_volume(volume as f32 / MAX_VOLUME as f32)?;
        Ok(())
    }

    /// Replaces the open playlist, the current track keeps playing.
    ///
    /// The index restarts at 0; see [`advance`](Self::advance) for what
    /// happens when the track from the old playlist ends.
    pub(crate) fn open_playlist(&mut self, playlist: Playlist) {
        debug!(folder = %playlist.folder().display(), tracks = playlist.len(), "Opened playlist");
        self.playlist = playlist;
        self.current_index = 0;
    }

    /// Starts playing `target`, replacing whatever is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::NoTrack`] if the target does not resolve to a
    /// file, or an engine error if the file could not be handed over.
    pub(crate) fn play(&mut self, target: PlayTarget) -> Result<()> {
        let path = match target {
            PlayTarget::Index(index) => {
                let track = self.playlist.get(index).ok_or(PlaybackError::NoTrack)?;
                self.current_index = index;
                track.path.clone()
            }
            PlayTarget::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(PlaybackError::NoTrack);
                }
                if let Some(index) = self.playlist.position(&path) {
                    self.current_index = index;
                }
                path
            }
        };

        let path = with_track_extension(path);

        info!("Now playing: {}", path.display());
        self.engine.play_file(&path)?;

        self.is_paused = false;
        self.loaded = Some(path);

        Ok(())
    }

    /// Plays the following track, wrapping to the first. Does nothing when
    /// the playlist is empty.
    pub(crate) fn next(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        let index = (self.current_index + 1) % self.playlist.len();
        self.play(PlayTarget::Index(index))
    }

    /// Plays the preceding track, wrapping to the last. Does nothing when
    /// the playlist is empty.
    pub(crate) fn previous(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        let index = match self.current_index {
            0 => self.playlist.len() - 1,
            i => (i - 1).min(self.playlist.len() - 1),
        };
        self.play(PlayTarget::Index(index))
    }

    /// Moves on after the loaded track ended.
    ///
    /// When the loaded track belongs to the open playlist this is [`next`].
    /// A track from an album that has since been replaced continues at the
    /// first track of the new one.
    ///
    /// [`next`]: Self::next
    pub(crate) fn advance(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        if self.loaded_index().is_some() {
            self.next()
        } else {
            self.play(PlayTarget::Index(0))
        }
    }

    /// The position of the loaded track in the open playlist.
    fn loaded_index(&self) -> Option<usize> {
        let loaded = self.loaded.as_deref()?;
        self.playlist
            .tracks()
            .iter()
            .position(|track| with_track_extension(track.path.clone()) == loaded)
    }

    pub(crate) fn toggle_pause(&mut self) -> Result<()> {
        if self.is_paused {
            self.engine.resume()?;
            self.is_paused = false;
        } else {
            self.engine.pause()?;
            self.is_paused = true;
        }

        Ok(())
    }

    pub(crate) fn stop(&mut self) -> Result<()> {
        self.engine.stop()?;
        self.is_paused = false;
        self.loaded = None;
        Ok(())
    }

    /// Sets the volume from a `0..=100` level and persists it.
    ///
    /// The engine is updated before the preferences are written, so a
    /// failed write still leaves the new volume audible.
    pub(crate) fn set_volume(&mut self, volume: u32) -> Result<()> {
        let volume = volume.min(MAX_VOLUME);
        self.engine.set_volume(volume as f32 / MAX_VOLUME as f32)?;
        self.preferences.set_volume(volume)?;
        Ok(())
    }

    /// Adjusts the volume by `delta`, saturating at both ends.
    pub(crate) fn adjust_volume(&mut self, delta: i32) -> Result<()> {
        let current = self.volume() as i32;
        self.set_volume((current + delta).clamp(0, MAX_VOLUME as i32) as u32)
    }
}

/// Appends [`TRACK_EXTENSION`] unless the path already ends with it.
pub(crate) fn with_track_extension(path: PathBuf) -> PathBuf {
    if path.to_string_lossy().ends_with(TRACK_EXTENSION) {
        return path;
    }

    let mut name = OsString::from(path);
    name.push(TRACK_EXTENSION);
    PathBuf::from(name)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::player::EndReason;

    /// Records every command and lets tests script the engine status.
    #[derive(Debug, Default)]
    pub(crate) struct FakeEngine {
        pub(crate) played: Vec<PathBuf>,
        pub(crate) volume: Option<f32>,
        pub(crate) paused: bool,
        pub(crate) stops: usize,
        pub(crate) status: EngineStatus,
    }

    impl FakeEngine {
        pub(crate) fn finish(&mut self, reason: EndReason) {
            self.status = EngineStatus {
                busy: false,
                end: Some(reason),
            };
        }
    }

    impl AudioEngine for FakeEngine {
        fn play_file(&mut self, path: &Path) -> anyhow::Result<()> {
            self.played.push(path.to_path_buf());
            self.paused = false;
            self.status = EngineStatus {
                busy: true,
                end: None,
            };
            Ok(())
        }

        fn pause(&mut self) -> anyhow::Result<()> {
            self.paused = true;
            self.status.busy = false;
            Ok(())
        }

        fn resume(&mut self) -> anyhow::Result<()> {
            self.paused = false;
            self.status.busy = self.status.end.is_none();
            Ok(())
        }

        fn stop(&mut self) -> anyhow::Result<()> {
            self.stops += 1;
            self.status = EngineStatus::default();
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) -> anyhow::Result<()> {
            self.volume = Some(volume);
            Ok(())
        }

        fn status(&self) -> EngineStatus {
            self.status
        }
    }

    impl PlaybackController<FakeEngine> {
        pub(crate) fn engine_mut(&mut self) -> &mut FakeEngine {
            &mut self.engine
        }
    }

    pub(crate) fn controller(dir: &TempDir, tracks: &[&str]) -> PlaybackController<FakeEngine> {
        let preferences = PreferencesStore::load(dir.path().join("config.json"));
        let mut controller = PlaybackController::new(FakeEngine::default(), preferences);
        let names = tracks.iter().map(|t| t.to_string()).collect();
        controller.open_playlist(Playlist::new(Path::new("/album"), names));
        controller
    }

    #[test]
    fn play_by_index_appends_extension() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["one", "two.mp3"]);

        controller.play(PlayTarget::Index(0)).unwrap();
        controller.play(PlayTarget::Index(1)).unwrap();

        assert_eq!(
            controller.engine().played,
            vec![PathBuf::from("/album/one.mp3"), PathBuf::from("/album/two.mp3")]
        );
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.loaded(), Some(Path::new("/album/two.mp3")));
    }

    #[test]
    fn play_by_path_moves_index_when_in_playlist() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b", "c"]);

        controller.play(PlayTarget::Path(PathBuf::from("/album/c"))).unwrap();
        assert_eq!(controller.current_index(), 2);

        controller.play(PlayTarget::Path(PathBuf::from("/elsewhere/x"))).unwrap();
        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.engine().played.last(), Some(&PathBuf::from("/elsewhere/x.mp3")));
    }

    #[test]
    fn unresolved_track_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &[]);

        assert!(matches!(controller.play(PlayTarget::Index(0)), Err(PlaybackError::NoTrack)));
        assert!(matches!(
            controller.play(PlayTarget::Path(PathBuf::new())),
            Err(PlaybackError::NoTrack)
        ));
        assert!(controller.engine().played.is_empty());
        assert!(controller.loaded().is_none());
    }

    #[test]
    fn next_cycles_back_to_start() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b", "c", "d"]);

        for start in 0..4 {
            controller.play(PlayTarget::Index(start)).unwrap();
            for _ in 0..4 {
                controller.next().unwrap();
            }
            assert_eq!(controller.current_index(), start);
        }
    }

    #[test]
    fn next_and_previous_wrap() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b", "c"]);

        controller.previous().unwrap();
        assert_eq!(controller.current_index(), 2);

        controller.next().unwrap();
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.engine().played.last(), Some(&PathBuf::from("/album/a.mp3")));
    }

    #[test]
    fn next_and_previous_on_empty_playlist_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &[]);
        controller.toggle_pause().unwrap();

        controller.next().unwrap();
        controller.previous().unwrap();

        assert_eq!(controller.current_index(), 0);
        assert!(controller.is_paused());
        assert!(controller.engine().played.is_empty());
    }

    #[test]
    fn toggle_pause_drives_engine() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a"]);
        controller.play(PlayTarget::Index(0)).unwrap();

        controller.toggle_pause().unwrap();
        assert!(controller.is_paused());
        assert!(controller.engine().paused);

        controller.toggle_pause().unwrap();
        assert!(!controller.is_paused());
        assert!(!controller.engine().paused);
    }

    #[test]
    fn play_clears_paused_flag() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b"]);
        controller.play(PlayTarget::Index(0)).unwrap();
        controller.toggle_pause().unwrap();

        controller.next().unwrap();
        assert!(!controller.is_paused());
    }

    #[test]
    fn set_volume_normalises_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &[]);

        controller.set_volume(75).unwrap();

        assert_eq!(controller.engine().volume, Some(0.75));
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("config.json")).unwrap())
                .unwrap();
        assert_eq!(saved["volume"], 75);
    }

    #[test]
    fn adjust_volume_saturates() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &[]);

        controller.adjust_volume(5).unwrap();
        assert_eq!(controller.preferences().volume(), 100);

        controller.set_volume(3).unwrap();
        controller.adjust_volume(-5).unwrap();
        assert_eq!(controller.preferences().volume(), 0);
        assert_eq!(controller.engine().volume, Some(0.0));
    }

    #[test]
    fn apply_preferences_clamps_stored_volume() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "volume": 300 }"#).unwrap();
        let mut controller = controller(&dir, &[]);

        controller.apply_preferences().unwrap();
        assert_eq!(controller.engine().volume, Some(1.0));
    }

    #[test]
    fn negative_stored_volume_is_silent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "volume": -5 }"#).unwrap();
        let mut controller = controller(&dir, &[]);

        assert_eq!(controller.volume(), 0);
        controller.apply_preferences().unwrap();
        assert_eq!(controller.engine().volume, Some(0.0));
    }

    #[test]
    fn stop_forgets_loaded_track() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a"]);
        controller.play(PlayTarget::Index(0)).unwrap();

        controller.stop().unwrap();
        assert!(controller.loaded().is_none());
        assert_eq!(controller.engine().stops, 1);
    }

    #[test]
    fn opening_a_playlist_resets_index() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b", "c"]);
        controller.play(PlayTarget::Index(2)).unwrap();

        controller.open_playlist(Playlist::new(Path::new("/other"), vec!["x".to_string()]));
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.loaded(), Some(Path::new("/album/c.mp3")));
    }

    #[test]
    fn advance_follows_the_open_playlist() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir, &["a", "b"]);

        controller.play(PlayTarget::Index(0)).unwrap();
        controller.advance().unwrap();
        assert_eq!(controller.loaded(), Some(Path::new("/album/b.mp3")));

        controller.play(PlayTarget::Path(PathBuf::from("/elsewhere/x"))).unwrap();
        controller.advance().unwrap();
        assert_eq!(controller.loaded(), Some(Path::new("/album/a.mp3")));
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn extension_is_appended_only_when_missing() {
        assert_eq!(with_track_extension(PathBuf::from("a/b.mp3")), PathBuf::from("a/b.mp3"));
        assert_eq!(with_track_extension(PathBuf::from("a/b")), PathBuf::from("a/b.mp3"));
        assert_eq!(with_track_extension(PathBuf::from("a/b.ogg")), PathBuf::from("a/b.ogg.mp3"));
    }
}
