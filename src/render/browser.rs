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

//! Render the album browser.
//!
//! Albums of the music folder on the left, tracks of the open album on the
//! right.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
    App,
    browser::BrowserPane,
    controller::with_track_extension,
    render::icons::{ICON_ALBUM_ART, ICON_NO_ALBUM_ART, ICON_PLAY},
    theme::Theme,
};

pub(crate) fn draw_browser(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let theme = app.theme;
    let browser = &mut app.browser;

    let album_items: Vec<ListItem> = browser
        .albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let icon = if album.has_icon { ICON_ALBUM_ART } else { ICON_NO_ALBUM_ART };
            let mut style = Style::default().fg(theme.text_colour);
            if browser.open_album == Some(i) {
                style = style.fg(theme.accent_colour).add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(album.name.as_str(), style),
            ]))
        })
        .collect();

    render_list(
        f,
        chunks[0],
        " Albums ",
        album_items,
        &mut browser.albums_state,
        browser.active_pane == BrowserPane::Album,
        &theme,
    );

    // The playing track is only marked while its album is the one shown.
    let loaded = app.controller.loaded();
    let track_items: Vec<ListItem> = app
        .controller
        .playlist()
        .tracks()
        .iter()
        .map(|track| {
            let playing = loaded == Some(with_track_extension(track.path.clone()).as_path());
            if playing {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", ICON_PLAY), Style::default().fg(theme.accent_colour)),
                    Span::styled(
                        track.name.as_str(),
                        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
                    ),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(track.name.as_str(), Style::default().fg(theme.text_colour)),
                ]))
            }
        })
        .collect();

    let title = match browser.open_album.and_then(|i| browser.albums.get(i)) {
        Some(album) => format!(" {} ", album.name),
        None => " Tracks ".to_string(),
    };

    render_list(
        f,
        chunks[1],
        &title,
        track_items,
        &mut browser.tracks_state,
        browser.active_pane == BrowserPane::Track,
        &theme,
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    state: &mut ListState,
    is_active: bool,
    theme: &Theme,
) {
    let border_style = if is_active {
        Style::default().fg(theme.active_border_colour).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    };

    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style))
        .highlight_style(Style::default().bg(theme.highlight_colour))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}
