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

//! Render the music player interface.
//!
//! This module renders the current track, its progress, the key hints for
//! the playback controls, and the volume.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP, volume_icon},
    util,
};

const CONTROL_HINTS: &str = "p prev   space pause   n next   s stop   -/+ volume   o folder";

/// Renders the main player widget including track info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    if let Some(loaded) = app.controller.loaded() {
        // The engine only learns about a user pause through MPV, the
        // controller flag is current immediately.
        let icon = match (app.controller.is_paused(), app.player_state) {
            (true, _) | (_, PlayerState::Paused) => ICON_PAUSE,
            (false, PlayerState::Playing) => ICON_PLAY,
            (false, PlayerState::Stopped) => ICON_STOP,
        };

        let track_line = Line::from(vec![
            Span::styled(format!(" {} ", icon), bold).fg(Color::White),
            Span::styled(util::format::track_title(loaded), bold).fg(app.theme.accent_colour),
        ]);
        f.render_widget(Paragraph::new(track_line), info_chunks[0]);

        let duration = app.player_duration.unwrap_or(0);
        let time = app.player_time.unwrap_or(0);
        let remaining = duration.saturating_sub(time);

        let time_line = Line::from(vec![
            Span::styled(util::format::format_time(time), bold).fg(app.theme.accent_colour),
            Span::styled(" / ", bold).fg(Color::White),
            Span::styled(util::format::format_time(duration), bold).fg(app.theme.accent_colour),
            Span::styled(format!(" (-{})", util::format::format_time(remaining)), bold)
                .fg(Color::White),
        ]);

        f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info_chunks[1]);
    } else {
        f.render_widget(
            Paragraph::new(format!(" {} Nothing playing", ICON_STOP)).fg(app.theme.info_colour),
            info_chunks[0],
        );
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[1]);

    f.render_widget(
        Paragraph::new(CONTROL_HINTS).fg(app.theme.info_colour),
        control_chunks[0],
    );

    let volume = app.controller.volume();

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(5)])
        .split(control_chunks[1]);

    f.render_widget(Paragraph::new(volume_icon(volume)), volume_layout[0]);

    let volume_gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent_colour).bg(app.theme.gauge_track_colour))
        .ratio(volume as f64 / 100.0)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[1]);

    let volume_label = Paragraph::new(format!(" {}%", volume))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_layout[2]);

    let position = match (app.player_time, app.player_duration) {
        (Some(time), Some(duration)) if duration > 0 => (time as f64 / duration as f64).clamp(0.0, 1.0),
        _ => 0.0,
    };

    let position_gauge = Gauge::default()
        .gauge_style(Style::default()
            .fg(app.theme.accent_colour)
            .bg(app.theme.gauge_track_colour)
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[2]);
}
