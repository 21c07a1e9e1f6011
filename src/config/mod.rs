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

//! Application configuration.
//!
//! This module manages the application configuration file, stored by `confy`
//! in the platform configuration directory. User preferences that change at
//! runtime (last folder, volume) live in a separate file, see
//! [`crate::preferences`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "albumui";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub preferences_file: String,
    pub watchdog_interval_ms: u64,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            preferences_file: "config.json".to_string(),
            watchdog_interval_ms: 1000,
            log_file: "albumui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// The watchdog interval, never shorter than 100ms.
    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_millis(self.watchdog_interval_ms.max(100))
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
