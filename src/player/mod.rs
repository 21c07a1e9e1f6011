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

//! Audio playback engine.
//!
//! This module defines the [`AudioEngine`] trait, the small synchronous
//! command surface the playback controller drives, and [`MpvEngine`], its
//! implementation on top of MPV.
//!
//! `MpvEngine` does not perform audio processing itself, it forwards commands
//! to a background worker thread that owns the MPV handle. The worker
//! publishes an [`EngineStatus`] snapshot that the handle can read at any
//! time without blocking on the worker.

mod commands;

use std::{
    path::Path,
    sync::{Arc, Mutex, mpsc},
};

use anyhow::Result;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// Why the most recently loaded file stopped producing sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EndReason {
    /// Played through to the end.
    Finished,
    /// Could not be opened or decoded.
    Failed,
}

/// A point-in-time view of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EngineStatus {
    /// Whether the engine is currently producing sound. A paused engine is
    /// not busy.
    pub(crate) busy: bool,
    /// Set once the loaded file has ended, cleared by the next load.
    pub(crate) end: Option<EndReason>,
}

/// The commands the playback controller issues to an audio backend.
///
/// Implementations must not block; loading a file replaces whatever is
/// currently playing.
pub(crate) trait AudioEngine {
    fn play_file(&mut self, path: &Path) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;

    /// Sets the output volume, `0.0` is silent and `1.0` is full volume.
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    fn status(&self) -> EngineStatus;
}

/// A handle to the MPV audio engine.
pub(crate) struct MpvEngine {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,

    status: Arc<Mutex<EngineStatus>>,
}

impl MpvEngine {
    /// Spawns the audio worker thread and returns a new engine handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (like progress
    ///   updates or errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();
        let status = Arc::new(Mutex::new(EngineStatus::default()));

        commands::spawn_player_worker(command_rx, event_tx, Arc::clone(&status));

        Ok(Self { command_tx, status })
    }

    fn update_status(&self, f: impl FnOnce(&mut EngineStatus)) {
        if let Ok(mut status) = self.status.lock() {
            f(&mut status);
        }
    }
}

impl AudioEngine for MpvEngine {
    fn play_file(&mut self, path: &Path) -> Result<()> {
        // Busy until the worker hears otherwise, so a watchdog tick that
        // lands before MPV has started the file does not skip it.
        self.update_status(|status| {
            status.busy = true;
            status.end = None;
        });

        self.command_tx
            .send(AudioPlayerCommand::PlayFile(path.to_string_lossy().into_owned()))?;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::SetPause(true))?;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.update_status(|status| status.busy = status.end.is_none());

        self.command_tx.send(AudioPlayerCommand::SetPause(false))?;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.update_status(|status| *status = EngineStatus::default());

        self.command_tx.send(AudioPlayerCommand::Stop)?;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::SetVolume(volume))?;
        Ok(())
    }

    fn status(&self) -> EngineStatus {
        self.status.lock().map(|status| *status).unwrap_or_default()
    }
}
