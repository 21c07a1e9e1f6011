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

//! End-of-track detection.
//!
//! The engine is polled on a fixed interval; once it reports that the loaded
//! track ended while the user has not paused, the playlist moves on to the
//! next track. This is the only thing that advances a playlist
//! automatically.
//!
//! A track that fails to start also reports an end. Such failures are counted,
//! and once every track in the playlist has failed in a row playback is
//! stopped instead of cycling forever without sound.

use std::{
    sync::mpsc::Sender,
    thread,
    time::Duration,
};

use tracing::{debug, warn};

use crate::{
    controller::{PlaybackController, Result},
    events::AppEvent,
    player::{AudioEngine, EndReason},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchdogAction {
    /// Playing, paused, or nothing to advance from.
    None,
    /// Moved on to the next track.
    Advanced,
    /// Too many consecutive failures, playback was stopped.
    GaveUp,
}

#[derive(Debug, Default)]
pub(crate) struct Watchdog {
    failures: usize,
}

impl Watchdog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Checks the engine once and advances the playlist if the loaded
    /// track has ended.
    ///
    /// Only a reported end counts. An engine that is merely quiet, for
    /// instance while MPV catches up with a resume, is left alone.
    pub(crate) fn tick<E: AudioEngine>(
        &mut self,
        controller: &mut PlaybackController<E>,
    ) -> Result<WatchdogAction> {
        if controller.is_paused() || controller.loaded().is_none() {
            return Ok(WatchdogAction::None);
        }

        let status = controller.engine_status();
        if status.busy {
            return Ok(WatchdogAction::None);
        }

        let Some(end) = status.end else {
            return Ok(WatchdogAction::None);
        };

        if end == EndReason::Failed {
            self.failures += 1;
            if self.failures >= controller.playlist().len().max(1) {
                warn!(failures = self.failures, "No track in the playlist could be played, stopping");
                self.failures = 0;
                controller.stop()?;
                return Ok(WatchdogAction::GaveUp);
            }
        } else {
            self.failures = 0;
        }

        debug!(?end, "Track ended, advancing");
        controller.advance()?;

        Ok(WatchdogAction::Advanced)
    }
}

/// Spawns the timer thread that posts a watchdog tick every `interval`.
pub(crate) fn spawn_watchdog_timer(interval: Duration, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        while event_tx.send(AppEvent::WatchdogTick).is_ok() {
            thread::sleep(interval);
        }
    });
}
