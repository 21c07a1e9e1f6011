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

//! Album playlist loading.
//!
//! Every album folder may contain a manifest file listing its tracks in play
//! order, one filename per line. This module turns that manifest into a
//! [`Playlist`] of track paths.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

/// Name of the manifest file inside each album folder.
pub(crate) const MANIFEST_FILE: &str = "list_data.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Track {
    /// The manifest line, shown in the track list.
    pub(crate) name: String,
    pub(crate) path: PathBuf,
}

/// The ordered tracks of a single album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Playlist {
    folder: PathBuf,
    tracks: Vec<Track>,
}

impl Playlist {
    pub(crate) fn new(folder: &Path, names: Vec<String>) -> Self {
        let tracks = names
            .into_iter()
            .map(|name| Track {
                path: folder.join(&name),
                name,
            })
            .collect();

        Self {
            folder: folder.to_path_buf(),
            tracks,
        }
    }

    pub(crate) fn folder(&self) -> &Path {
        &self.folder
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub(crate) fn position(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|track| track.path == path)
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Splits manifest text into track names.
///
/// Surrounding whitespace is trimmed, blank lines are dropped, and the order
/// of the file is kept.
pub(crate) fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the playlist for an album folder.
///
/// A folder without a manifest, or with one that cannot be read, yields an
/// empty playlist.
pub(crate) fn load_playlist(album_folder: &Path) -> Playlist {
    let manifest = album_folder.join(MANIFEST_FILE);

    let names = match fs::read_to_string(&manifest) {
        Ok(text) => parse_manifest(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(folder = %album_folder.display(), "Album has no manifest");
            vec![]
        }
        Err(e) => {
            warn!(manifest = %manifest.display(), error = %e, "Unable to read album manifest");
            vec![]
        }
    };

    Playlist::new(album_folder, names)
}
