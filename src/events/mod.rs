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

//! Application event handling and dispatching.
//!
//! Every input the application reacts to, key presses, typed commands,
//! engine notifications and timer ticks, arrives as an [`AppEvent`] on a
//! single channel. [`process_events`] drains that channel on the main thread
//! and hands each event to a handler, so all state changes happen in one
//! place and in order.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::{io::Stdout, path::PathBuf};

use anyhow::{Result, anyhow};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, player::PlayerState, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    OpenFolder(PathBuf),
    OpenAlbum(usize),

    PlayTrack(usize),
    PlayNext,
    PlayPrevious,
    TogglePause,
    Stop,

    SetVolume(u32),
    AdjustVolume(i32),

    PlayerStateChanged(PlayerState),
    DurationChanged(u64),
    TimeChanged(f64),

    WatchdogTick,
    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error when a [`AppEvent::FatalError`] is received, or when the
/// terminal cannot be drawn.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => return Err(anyhow!(message)),

            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::OpenFolder(path) => handle_open_folder(app, path),
            AppEvent::OpenAlbum(index) => handle_open_album(app, index),
            AppEvent::PlayTrack(index) => handle_play_track(app, index),
            AppEvent::PlayNext => handle_play_next(app),
            AppEvent::PlayPrevious => handle_play_previous(app),
            AppEvent::TogglePause => handle_toggle_pause(app),
            AppEvent::Stop => handle_stop(app),
            AppEvent::SetVolume(volume) => handle_set_volume(app, volume),
            AppEvent::AdjustVolume(delta) => handle_adjust_volume(app, delta),
            AppEvent::PlayerStateChanged(state) => handle_player_state_changed(app, state),
            AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
            AppEvent::TimeChanged(secs) => handle_time_changed(app, secs),
            AppEvent::WatchdogTick => handle_watchdog_tick(app),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::Tick => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
