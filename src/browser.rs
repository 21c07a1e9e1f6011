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

//! Album browser state management.
//!
//! This module provides state for the album browser widget, the list of
//! albums in the music folder, the tracks of the open album, and which of
//! the two panes has focus.

use ratatui::widgets::ListState;

use crate::library::Album;

#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) enum BrowserPane {
    #[default]
    Album,
    Track,
}

#[derive(Default)]
pub(crate) struct AlbumBrowser {
    pub(crate) active_pane: BrowserPane,

    pub(crate) albums: Vec<Album>,
    pub(crate) tracks: Vec<String>,

    /// The album whose tracks are listed.
    pub(crate) open_album: Option<usize>,

    pub(crate) albums_state: ListState,
    pub(crate) tracks_state: ListState,
}

impl AlbumBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_pane(&mut self, pane: BrowserPane) {
        self.active_pane = pane;
    }

    pub(crate) fn toggle_pane(&mut self) {
        self.active_pane = match self.active_pane {
            BrowserPane::Album => BrowserPane::Track,
            BrowserPane::Track => BrowserPane::Album,
        };
    }

    pub(crate) fn selected_album(&self) -> Option<usize> {
        self.albums_state.selected().filter(|&i| i < self.albums.len())
    }

    pub(crate) fn selected_track(&self) -> Option<usize> {
        self.tracks_state.selected().filter(|&i| i < self.tracks.len())
    }

    pub(crate) fn next_item(&mut self) {
        match self.active_pane {
            BrowserPane::Album => Self::next(&mut self.albums_state, self.albums.len()),
            BrowserPane::Track => Self::next(&mut self.tracks_state, self.tracks.len()),
        }
    }

    pub(crate) fn previous_item(&mut self) {
        match self.active_pane {
            BrowserPane::Album => Self::previous(&mut self.albums_state, self.albums.len()),
            BrowserPane::Track => Self::previous(&mut self.tracks_state, self.tracks.len()),
        }
    }

    pub(crate) fn set_albums(&mut self, albums: Vec<Album>) {
        self.albums = albums;
        self.open_album = None;
        self.albums_state.select((!self.albums.is_empty()).then_some(0));
    }

    pub(crate) fn set_tracks(&mut self, tracks: Vec<String>) {
        self.tracks = tracks;
        self.tracks_state.select((!self.tracks.is_empty()).then_some(0));
    }

    fn next(state: &mut ListState, len: usize) {
        if len == 0 { return; }
        let i = match state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        state.select(Some(i));
    }

    fn previous(state: &mut ListState, len: usize) {
        if len == 0 { return; }
        let i = match state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        state.select(Some(i));
    }
}
