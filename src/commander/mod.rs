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

//! Command-line input logic and state management.
//!
//! This module implements the bottom input line. It has two modes: a `:`
//! command line, and a prompt asking for the music folder. In both cases a
//! `tui-input` text component collects the text, and the corresponding
//! application event is dispatched when it is submitted.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
};

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::events::AppEvent;

pub(crate) const NO_FOLDER_SELECTED: &str = "No folder selected. Exiting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommanderMode {
    Inactive,
    Command,
    /// Asking for the music folder. A required prompt cannot be dismissed
    /// without ending the application.
    Folder { required: bool },
}

pub(crate) struct Commander {
    mode: CommanderMode,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            mode: CommanderMode::Inactive,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.mode != CommanderMode::Inactive
    }

    pub(crate) fn prompt(&self) -> &'static str {
        match self.mode {
            CommanderMode::Inactive => "",
            CommanderMode::Command => ":",
            CommanderMode::Folder { .. } => "Music folder: ",
        }
    }

    /// Starts asking for a music folder, pre-filled with `current`.
    pub(crate) fn open_folder_prompt(&mut self, current: Option<&Path>, required: bool) {
        let value = current
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.input = Input::new(value);
        self.mode = CommanderMode::Folder { required };
    }

    /// Handles a terminal event, returning `true` if the commander consumed
    /// it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        match self.mode {
            CommanderMode::Inactive => {
                if key_event.code == KeyCode::Char(':') {
                    self.input.reset();
                    self.mode = CommanderMode::Command;
                    return Ok(true);
                }
                Ok(false)
            }

            CommanderMode::Command => {
                match key_event.code {
                    KeyCode::Esc => self.close(),
                    KeyCode::Enter => {
                        let buffer = self.input.value().trim().to_string();
                        self.close();
                        if !buffer.is_empty() {
                            self.run_command(&buffer, event_tx)?;
                        }
                    }
                    // Delegate all other key events to the managed input component.
                    _ => {
                        self.input.handle_event(event);
                    }
                }
                Ok(true)
            }

            CommanderMode::Folder { required } => {
                match key_event.code {
                    KeyCode::Esc => self.finish_folder_prompt("", required, event_tx)?,
                    KeyCode::Enter => {
                        let buffer = self.input.value().trim().to_string();
                        self.finish_folder_prompt(&buffer, required, event_tx)?;
                    }
                    _ => {
                        self.input.handle_event(event);
                    }
                }
                Ok(true)
            }
        }
    }

    fn close(&mut self) {
        self.input.reset();
        self.mode = CommanderMode::Inactive;
    }

    fn finish_folder_prompt(&mut self, folder: &str, required: bool, event_tx: &Sender<AppEvent>) -> Result<()> {
        self.close();

        if !folder.is_empty() {
            event_tx.send(AppEvent::OpenFolder(PathBuf::from(folder)))?;
        } else if required {
            event_tx.send(AppEvent::FatalError(NO_FOLDER_SELECTED.to_string()))?;
        }

        Ok(())
    }

    fn run_command(&self, buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] => event_tx.send(AppEvent::ExitApplication)?,

            ["open", path_parts @ ..] if !path_parts.is_empty() => {
                let path = path_parts.join(" ");
                event_tx.send(AppEvent::OpenFolder(PathBuf::from(path)))?
            }

            ["p"] => event_tx.send(AppEvent::TogglePause)?,
            ["pn"] => event_tx.send(AppEvent::PlayNext)?,
            ["pp"] => event_tx.send(AppEvent::PlayPrevious)?,
            ["s"] => event_tx.send(AppEvent::Stop)?,

            ["v", volume] => match volume.parse::<u32>() {
                Ok(volume) if volume <= 100 => event_tx.send(AppEvent::SetVolume(volume))?,
                _ => event_tx.send(AppEvent::Error(format!("Volume must be 0-100: {}", volume)))?,
            },

            [] => {}

            [cmd, ..] => event_tx.send(AppEvent::Error(format!("Unknown command: {}", cmd)))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(commander: &mut Commander, text: &str, tx: &Sender<AppEvent>) {
        for c in text.chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), tx).unwrap());
        }
    }

    fn submit(text: &str) -> Receiver<AppEvent> {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        type_text(&mut commander, ":", &tx);
        type_text(&mut commander, text, &tx);
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();
        assert!(!commander.active());
        rx
    }

    #[test]
    fn keys_pass_through_when_inactive() {
        let (tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('n')), &tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx).unwrap());
        assert_eq!(commander.prompt(), ":");
    }

    #[test]
    fn volume_command() {
        let rx = submit("v 75");
        assert!(matches!(rx.try_recv(), Ok(AppEvent::SetVolume(75))));

        let rx = submit("v 101");
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Error(_))));
    }

    #[test]
    fn open_command_keeps_spaces() {
        let rx = submit("open /music/My Albums");
        match rx.try_recv() {
            Ok(AppEvent::OpenFolder(path)) => assert_eq!(path, PathBuf::from("/music/My Albums")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_command_is_reported() {
        let rx = submit("dance");
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Error(_))));
    }

    #[test]
    fn cancelling_required_folder_prompt_is_fatal() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.open_folder_prompt(None, true);

        commander.handle_event(&key(KeyCode::Esc), &tx).unwrap();

        match rx.try_recv() {
            Ok(AppEvent::FatalError(message)) => assert_eq!(message, NO_FOLDER_SELECTED),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn cancelling_optional_folder_prompt_does_nothing() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.open_folder_prompt(Some(Path::new("/old")), false);

        commander.handle_event(&key(KeyCode::Esc), &tx).unwrap();

        assert!(rx.try_recv().is_err());
        assert!(!commander.active());
    }

    #[test]
    fn folder_prompt_submits_typed_path() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.open_folder_prompt(None, true);

        type_text(&mut commander, "/srv/music", &tx);
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();

        match rx.try_recv() {
            Ok(AppEvent::OpenFolder(path)) => assert_eq!(path, PathBuf::from("/srv/music")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
