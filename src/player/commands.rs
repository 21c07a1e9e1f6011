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

//! MPV-backed audio playback worker.
//!
//! This module runs the background thread that owns the `libmpv` handle. It
//! bridges the engine's command-based interface and the MPV event and
//! property observation system.
//!
//! # Architecture
//!
//! The worker operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the
//!    [`MpvEngine`](super::MpvEngine) handle (play, pause, volume, etc.).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI of state
//!    changes, such as track progress and duration.
//!
//! In addition the worker keeps the shared [`EngineStatus`] current, which
//! is what the end-of-track watchdog reads.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
};
use tracing::{debug, warn};

use crate::{
    events::AppEvent,
    player::{EndReason, EngineStatus, PlayerState},
};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    PlayFile(String),
    SetPause(bool),
    Stop,
    SetVolume(f32),
}

/// Tracks the MPV flags the worker needs between events.
#[derive(Debug)]
struct WorkerState {
    is_paused: bool,
    is_idle: bool,
    /// A file was requested and MPV has not announced it started yet, any
    /// end-of-file seen meanwhile belongs to the file being replaced.
    awaiting_start: bool,
    player_state: PlayerState,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
/// * `status` - The status snapshot shared with the engine handle.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    status: Arc<Mutex<EngineStatus>>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx, status) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// Maps MPV flags to a simplified [`PlayerState`].
fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
    if is_idle {
        PlayerState::Stopped
    } else if is_paused {
        PlayerState::Paused
    } else {
        PlayerState::Playing
    }
}

/// The primary execution loop for the audio player backend.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the internal
/// command/event loops encounter an unrecoverable failure.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    status: Arc<Mutex<EngineStatus>>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut state = WorkerState {
        is_paused: false,
        is_idle: true,
        awaiting_start: false,
        player_state: PlayerState::Stopped,
    };

    loop {
        if !process_commands(&mut handler, &command_rx, &mut state, &status, &event_tx)? {
            return Ok(());
        }
        process_mpv_events(&mut handler, &mut state, &status, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the engine handle.
///
/// Returns `false` once the handle has been dropped.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<AudioPlayerCommand>,
    state: &mut WorkerState,
    status: &Arc<Mutex<EngineStatus>>,
    event_tx: &Sender<AppEvent>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "Audio command");

        match command {
            AudioPlayerCommand::PlayFile(filename) => {
                state.awaiting_start = true;
                if let Err(e) = handler.command(&["loadfile", &filename, "replace"]) {
                    // Reported as a failed file rather than a dead worker, the
                    // watchdog decides what happens next.
                    warn!(file = %filename, error = ?e, "MPV rejected loadfile");
                    state.awaiting_start = false;
                    if let Ok(mut status) = status.lock() {
                        status.busy = false;
                        status.end = Some(EndReason::Failed);
                    }
                    event_tx
                        .send(AppEvent::Error(format!("Failed to load file: {}", filename)))
                        .context("Failed to send error event")?;
                    continue;
                }
                handler.set_property("pause", false)?;
            }
            AudioPlayerCommand::SetPause(pause) => {
                handler.set_property("pause", pause)?;
            }
            AudioPlayerCommand::Stop => {
                state.awaiting_start = false;
                handler.command(&["stop"])?;
            }
            AudioPlayerCommand::SetVolume(volume) => {
                let volume = (volume.clamp(0.0, 1.0) * 100.0) as f64;
                handler.set_property("volume", volume)?;
            }
        }
    }
}

/// Polls for MPV events and synchronizes the shared engine status.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    status: &Arc<Mutex<EngineStatus>>,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let mut end = None;

    let app_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(duration)) => {
                Some(AppEvent::DurationChanged(duration as u64))
            }
            ("pause", Format::Flag(pause)) => {
                state.is_paused = pause;
                None
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                Some(AppEvent::TimeChanged(seconds))
            }
            ("idle-active", Format::Flag(idle_active)) => {
                state.is_idle = idle_active;
                None
            }
            _ => None,
        },
        mpv::Event::StartFile => {
            state.awaiting_start = false;
            None
        }
        mpv::Event::EndFile(result) if !state.awaiting_start => match result {
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => {
                end = Some(EndReason::Finished);
                None
            }
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) | Err(_) => {
                end = Some(EndReason::Failed);
                Some(AppEvent::Error("Unable to play track".to_string()))
            }
            _ => None,
        },
        _ => None,
    };

    if let Ok(mut status) = status.lock() {
        if let Some(reason) = end {
            status.busy = false;
            status.end = Some(reason);
        } else if status.end.is_none() && !state.is_idle {
            status.busy = !state.is_paused;
        }
    }

    let new_player_state = player_state(state.is_paused, state.is_idle);

    if new_player_state != state.player_state {
        state.player_state = new_player_state;
        event_tx
            .send(AppEvent::PlayerStateChanged(new_player_state))
            .context("Failed to send player state event")?;
    }

    if let Some(event) = app_event {
        event_tx.send(event).context("Failed to send event")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_wins_over_pause() {
        assert_eq!(player_state(true, true), PlayerState::Stopped);
        assert_eq!(player_state(true, false), PlayerState::Paused);
        assert_eq!(player_state(false, false), PlayerState::Playing);
    }
}
