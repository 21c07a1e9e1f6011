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

//! Unicode symbols for the TUI.

// Media controls
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";

// Volume, loudest first
pub(crate) const ICON_VOLUME_HIGH: &str = "\u{1F50A}";
pub(crate) const ICON_VOLUME_MEDIUM: &str = "\u{1F509}";
pub(crate) const ICON_VOLUME_LOW: &str = "\u{1F508}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}";

// Shown beside albums that have artwork.
pub(crate) const ICON_ALBUM_ART: &str = "\u{25A3}";
pub(crate) const ICON_NO_ALBUM_ART: &str = "\u{25A1}";

pub(crate) fn volume_icon(volume: u32) -> &'static str {
    match volume {
        0 => ICON_MUTED,
        1..=33 => ICON_VOLUME_LOW,
        34..=66 => ICON_VOLUME_MEDIUM,
        _ => ICON_VOLUME_HIGH,
    }
}
