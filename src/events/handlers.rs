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

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    App, StatusMessage,
    browser::{AlbumBrowser, BrowserPane},
    controller::{self, PlayTarget, PlaybackController},
    library,
    player::{AudioEngine, PlayerState},
    playlist,
    watchdog::{Watchdog, WatchdogAction},
};

const NO_ALBUMS: &str = "No albums found in the selected folder.";
const NOTHING_PLAYABLE: &str = "No track in this album could be played";

/// Outcome of switching to a new music folder.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum FolderOpened {
    /// The folder has albums, the first one was opened.
    Albums(usize),
    /// The folder exists but has no album subfolders.
    Empty,
}

/// Lists the albums in `folder`, remembers the folder, and opens the first
/// album.
///
/// A failure to persist the folder is logged and otherwise ignored, the
/// folder is still opened.
pub(super) fn open_music_folder<E: AudioEngine>(
    controller: &mut PlaybackController<E>,
    browser: &mut AlbumBrowser,
    folder: &Path,
) -> Result<FolderOpened> {
    let albums = library::list_albums(folder)?;

    if let Err(e) = controller.preferences_mut().set_last_folder(folder) {
        warn!(error = %e, "Unable to remember music folder");
    }

    info!(folder = %folder.display(), albums = albums.len(), "Opened music folder");

    let count = albums.len();
    browser.set_albums(albums);

    if count == 0 {
        browser.set_tracks(vec![]);
        return Ok(FolderOpened::Empty);
    }

    open_album(controller, browser, 0);
    Ok(FolderOpened::Albums(count))
}

/// Loads the playlist of the album at `index` and shows its tracks.
pub(super) fn open_album<E: AudioEngine>(
    controller: &mut PlaybackController<E>,
    browser: &mut AlbumBrowser,
    index: usize,
) {
    let Some(album) = browser.albums.get(index) else {
        return;
    };

    let playlist = playlist::load_playlist(&album.path);

    browser.open_album = Some(index);
    browser.set_tracks(playlist.tracks().iter().map(|t| t.name.clone()).collect());

    controller.open_playlist(playlist);
}

pub(super) fn handle_open_folder(app: &mut App, path: PathBuf) {
    match open_music_folder(&mut app.controller, &mut app.browser, &path) {
        Ok(FolderOpened::Albums(_)) => {
            app.music_folder = Some(path);
            app.status = None;
        }
        Ok(FolderOpened::Empty) => {
            app.music_folder = Some(path);
            app.status = Some(StatusMessage::Info(NO_ALBUMS.to_string()));
        }
        Err(e) => {
            warn!(error = ?e, "Unable to open music folder");
            app.status = Some(StatusMessage::Error(format!("{:#}", e)));

            // Without any folder there is nothing to show, so keep asking.
            if app.music_folder.is_none() {
                app.commander.open_folder_prompt(Some(path.as_path()), true);
            }
        }
    }
}

pub(super) fn handle_open_album(app: &mut App, index: usize) {
    open_album(&mut app.controller, &mut app.browser, index);
    app.browser.set_pane(BrowserPane::Track);
}

pub(super) fn handle_play_track(app: &mut App, index: usize) {
    let result = app.controller.play(PlayTarget::Index(index));
    report(app, result);
}

pub(super) fn handle_play_next(app: &mut App) {
    let result = app.controller.next();
    report(app, result);
}

pub(super) fn handle_play_previous(app: &mut App) {
    let result = app.controller.previous();
    report(app, result);
}

pub(super) fn handle_toggle_pause(app: &mut App) {
    let result = app.controller.toggle_pause();
    report(app, result);
}

pub(super) fn handle_stop(app: &mut App) {
    let result = app.controller.stop();
    app.player_time = None;
    app.player_duration = None;
    report(app, result);
}

pub(super) fn handle_set_volume(app: &mut App, volume: u32) {
    let result = app.controller.set_volume(volume);
    report(app, result);
}

pub(super) fn handle_adjust_volume(app: &mut App, delta: i32) {
    let result = app.controller.adjust_volume(delta);
    report(app, result);
}

pub(super) fn handle_player_state_changed(app: &mut App, state: PlayerState) {
    app.player_state = state;
}

pub(super) fn handle_duration_changed(app: &mut App, duration: u64) {
    app.player_duration = Some(duration);
}

pub(super) fn handle_time_changed(app: &mut App, secs: f64) {
    app.player_time = Some(secs as u64);
}

pub(super) fn handle_watchdog_tick(app: &mut App) {
    if let Some(message) = run_watchdog(&mut app.watchdog, &mut app.controller) {
        app.status = Some(message);
    }
}

/// Runs one watchdog check, returning the message to show when playback
/// had to be stopped or could not continue.
pub(super) fn run_watchdog<E: AudioEngine>(
    watchdog: &mut Watchdog,
    controller: &mut PlaybackController<E>,
) -> Option<StatusMessage> {
    match watchdog.tick(controller) {
        Ok(WatchdogAction::GaveUp) => Some(StatusMessage::Error(NOTHING_PLAYABLE.to_string())),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Unable to advance playlist");
            Some(StatusMessage::Error(e.to_string()))
        }
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!("{}", message);
    app.status = Some(StatusMessage::Error(message));
}

/// Shows a failed playback action in the status line, it is never fatal.
fn report(app: &mut App, result: controller::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "Playback action failed");
        app.status = Some(StatusMessage::Error(e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{controller::tests::controller, player::EndReason, playlist::MANIFEST_FILE};

    #[test]
    fn opening_a_folder_opens_the_first_album_and_persists() {
        let prefs = TempDir::new().unwrap();
        let music = TempDir::new().unwrap();
        fs::create_dir(music.path().join("B")).unwrap();
        fs::create_dir(music.path().join("A")).unwrap();
        fs::write(music.path().join("A").join(MANIFEST_FILE), "x\ny\n").unwrap();

        let mut controller = controller(&prefs, &[]);
        let mut browser = AlbumBrowser::new();

        let opened = open_music_folder(&mut controller, &mut browser, music.path()).unwrap();

        assert_eq!(opened, FolderOpened::Albums(2));
        assert_eq!(browser.open_album, Some(0));
        assert_eq!(browser.tracks, vec!["x", "y"]);
        assert_eq!(controller.playlist().folder(), music.path().join("A"));
        assert_eq!(controller.preferences().last_folder(), Some(music.path()));
        assert!(controller.engine().played.is_empty());
    }

    #[test]
    fn folder_without_albums_is_reported_empty() {
        let prefs = TempDir::new().unwrap();
        let music = TempDir::new().unwrap();

        let mut controller = controller(&prefs, &[]);
        let mut browser = AlbumBrowser::new();

        let opened = open_music_folder(&mut controller, &mut browser, music.path()).unwrap();
        assert_eq!(opened, FolderOpened::Empty);
        assert!(browser.albums.is_empty());
    }

    #[test]
    fn missing_folder_is_not_persisted() {
        let prefs = TempDir::new().unwrap();
        let music = TempDir::new().unwrap();

        let mut controller = controller(&prefs, &[]);
        let mut browser = AlbumBrowser::new();

        assert!(open_music_folder(&mut controller, &mut browser, &music.path().join("gone")).is_err());
        assert!(controller.preferences().last_folder().is_none());
    }

    #[test]
    fn album_without_manifest_has_no_tracks() {
        let prefs = TempDir::new().unwrap();
        let music = TempDir::new().unwrap();
        fs::create_dir(music.path().join("Quiet")).unwrap();

        let mut controller = controller(&prefs, &["stale"]);
        let mut browser = AlbumBrowser::new();
        open_music_folder(&mut controller, &mut browser, music.path()).unwrap();

        assert!(browser.tracks.is_empty());
        assert!(controller.playlist().is_empty());
    }

    #[test]
    fn watchdog_giving_up_is_reported() {
        let prefs = TempDir::new().unwrap();
        let mut controller = controller(&prefs, &["gone", "missing"]);
        let mut watchdog = Watchdog::new();
        controller.play(PlayTarget::Index(0)).unwrap();

        controller.engine_mut().finish(EndReason::Failed);
        assert_eq!(run_watchdog(&mut watchdog, &mut controller), None);
        assert_eq!(controller.current_index(), 1);

        controller.engine_mut().finish(EndReason::Failed);
        assert_eq!(
            run_watchdog(&mut watchdog, &mut controller),
            Some(StatusMessage::Error(NOTHING_PLAYABLE.to_string()))
        );
        assert!(controller.loaded().is_none());
    }

    #[test]
    fn finished_track_needs_no_message() {
        let prefs = TempDir::new().unwrap();
        let mut controller = controller(&prefs, &["a", "b"]);
        let mut watchdog = Watchdog::new();
        controller.play(PlayTarget::Index(0)).unwrap();

        controller.engine_mut().finish(EndReason::Finished);
        assert_eq!(run_watchdog(&mut watchdog, &mut controller), None);
        assert_eq!(controller.loaded(), Some(Path::new("/album/b.mp3")));
    }
}
