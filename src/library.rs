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

//! Album discovery.
//!
//! An album is any directory directly inside the music folder.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Optional artwork file inside an album folder.
pub(crate) const ALBUM_ICON_FILE: &str = "album_icon.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Album {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) has_icon: bool,
}

/// Lists the album folders inside `root`, sorted by name.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub(crate) fn list_albums(root: &Path) -> Result<Vec<Album>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read music folder {}", root.display()))?;

    let mut albums: Vec<Album> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .map(|path| Album {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            has_icon: path.join(ALBUM_ICON_FILE).is_file(),
            path,
        })
        .collect();

    albums.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(albums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_directories_only_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Zebra")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not an album").unwrap();

        let albums = list_albums(dir.path()).unwrap();
        let names: Vec<_> = albums.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names, vec!["Alpha", "Zebra"]);
        assert_eq!(albums[0].path, dir.path().join("Alpha"));
    }

    #[test]
    fn detects_album_icon() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("with")).unwrap();
        fs::create_dir(dir.path().join("without")).unwrap();
        fs::write(dir.path().join("with").join(ALBUM_ICON_FILE), [0u8; 4]).unwrap();

        let albums = list_albums(dir.path()).unwrap();

        assert!(albums[0].has_icon);
        assert!(!albums[1].has_icon);
    }

    #[test]
    fn empty_folder_has_no_albums() {
        let dir = TempDir::new().unwrap();
        assert!(list_albums(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_albums(&dir.path().join("gone")).is_err());
    }
}
