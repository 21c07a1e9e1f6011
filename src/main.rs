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

//! # Album Player TUI.
//!
//! A terminal music player for a folder of albums.
//!
//! Each subfolder of the music folder is an album, and each album lists its
//! tracks, in play order, in a manifest file. Tracks are played one after
//! another through MPV; the last folder and the volume are remembered
//! between runs.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns all application state, manages the terminal
//!   lifecycle and renders the UI.
//! * **Helper Threads** only post [`AppEvent`]s: key input, a render tick and
//!   the end-of-track watchdog tick.
//! * The **Audio Worker** owns the MPV handle, see [`player`].
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is restored even when the run fails.

mod browser;
mod commander;
mod config;
mod controller;
mod events;
mod library;
mod logging;
mod player;
mod playlist;
mod preferences;
mod render;
mod theme;
mod util;
mod watchdog;

use anyhow::{Context, Result};
use crossterm::event::{self, KeyEventKind};
use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    browser::AlbumBrowser,
    commander::Commander,
    config::AppConfig,
    controller::PlaybackController,
    events::{AppEvent, process_events},
    player::{MpvEngine, PlayerState},
    preferences::PreferencesStore,
    theme::Theme,
    util::term::{Tui, restore_terminal, setup_terminal},
    watchdog::Watchdog,
};

const RENDER_TICK: Duration = Duration::from_millis(250);

/// A message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusMessage {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub controller: PlaybackController<MpvEngine>,
    pub watchdog: Watchdog,

    pub commander: Commander,
    pub browser: AlbumBrowser,

    /// The folder whose albums are listed.
    pub music_folder: Option<PathBuf>,

    pub player_state: PlayerState,
    pub player_duration: Option<u64>,
    pub player_time: Option<u64>,

    pub status: Option<StatusMessage>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let engine = MpvEngine::new(event_tx.clone())?;
        let preferences = PreferencesStore::load(&config.preferences_file);

        info!(path = %preferences.path().display(), volume = preferences.volume(), "Loaded preferences");

        let mut controller = PlaybackController::new(engine, preferences);
        if let Err(e) = controller.apply_preferences() {
            warn!(error = %e, "Unable to apply saved volume");
        }

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            controller,
            watchdog: Watchdog::new(),
            commander: Commander::new(),
            browser: AlbumBrowser::new(),
            music_folder: None,
            player_state: PlayerState::Stopped,
            player_duration: None,
            player_time: None,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Loads the configuration, initialises logging and application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    if let Err(e) = logging::init_tracing(&config) {
        eprintln!("Logging disabled: {:#}", e);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting");

    let mut app = App::new(config).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app.theme)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Starts the helper threads, opens the music folder and enters the main
/// event loop.
///
/// The remembered music folder is opened if it still exists, otherwise the
/// user is asked for one before anything else can happen.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error, including the user declining to pick a folder.
fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(RENDER_TICK);
        }
    });

    watchdog::spawn_watchdog_timer(app.config.watchdog_interval(), app.event_tx.clone());

    let saved_folder = app
        .controller
        .preferences()
        .last_folder()
        .filter(|folder| folder.is_dir())
        .map(PathBuf::from);

    match saved_folder {
        Some(folder) => app.event_tx.send(AppEvent::OpenFolder(folder))?,
        None => app.commander.open_folder_prompt(None, true),
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
