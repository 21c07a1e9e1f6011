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

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{App, browser::BrowserPane, events::AppEvent};

const FINE_VOLUME_DELTA: i32 = 1;
const VOLUME_DELTA: i32 = 5;

/// Maps keyboard input to application events.
///
/// The commander gets the first look at every key; while it is active it
/// consumes all of them. Everything else is a global shortcut:
///
/// * **Application Control**: quitting, choosing another music folder.
/// * **Navigation**: moving within and between the album and track panes.
/// * **Playback**: play, pause, next, previous, stop and volume.
///
/// # Errors
///
/// Returns an error if an event cannot be posted to the event loop.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('o') => app
            .commander
            .open_folder_prompt(app.music_folder.as_deref(), false),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.browser.next_item(),
        KeyCode::Char('k') | KeyCode::Up => app.browser.previous_item(),

        KeyCode::Char('h') | KeyCode::Left => app.browser.set_pane(BrowserPane::Album),
        KeyCode::Char('l') | KeyCode::Right => app.browser.set_pane(BrowserPane::Track),
        KeyCode::Tab => app.browser.toggle_pane(),

        KeyCode::Enter => match app.browser.active_pane {
            BrowserPane::Album => {
                if let Some(index) = app.browser.selected_album() {
                    app.event_tx.send(AppEvent::OpenAlbum(index))?;
                }
            }
            BrowserPane::Track => {
                if let Some(index) = app.browser.selected_track() {
                    app.event_tx.send(AppEvent::PlayTrack(index))?;
                }
            }
        },

        // Playback
        KeyCode::Char(' ') => app.event_tx.send(AppEvent::TogglePause)?,
        KeyCode::Char('n') => app.event_tx.send(AppEvent::PlayNext)?,
        KeyCode::Char('p') => app.event_tx.send(AppEvent::PlayPrevious)?,
        KeyCode::Char('s') => app.event_tx.send(AppEvent::Stop)?,

        KeyCode::Char('-') => app.event_tx.send(AppEvent::AdjustVolume(-FINE_VOLUME_DELTA))?,
        KeyCode::Char('=') => app.event_tx.send(AppEvent::AdjustVolume(FINE_VOLUME_DELTA))?,
        KeyCode::Char('_') => app.event_tx.send(AppEvent::AdjustVolume(-VOLUME_DELTA))?,
        KeyCode::Char('+') => app.event_tx.send(AppEvent::AdjustVolume(VOLUME_DELTA))?,

        _ => {}
    }

    Ok(())
}
