// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Owning context object
//!
//! # Responsibilities
//!
//! - Load settings through the `SettingsManager` (migrating on the way)
//! - Answer keydown events from the host with the current settings
//! - Apply edits from a settings UI and persist them
//!
//! The host wires its keydown subscription to [`ModalKeys::on_key_down`] and
//! its settings screen to [`ModalKeys::update`]. Nothing else holds the
//! settings record.

use tracing::warn;

use crate::config::{ConfigError, Settings, SettingsManager};
use crate::context::Document;
use crate::core::dispatch::{handle_key_event, DispatchOutcome, KeyboardHost};
use crate::core::KeyEvent;

/// Settings plus the store they came from
pub struct ModalKeys {
    manager: SettingsManager,
    settings: Settings,
}

impl ModalKeys {
    /// Loads (and migrates) settings from `manager`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings file exists but cannot be read,
    /// parsed, backed up or rewritten.
    pub fn load(manager: SettingsManager) -> Result<Self, ConfigError> {
        let settings = manager.load()?;
        Ok(Self { manager, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn manager(&self) -> &SettingsManager {
        &self.manager
    }

    /// Handles one keydown from the host
    pub fn on_key_down(
        &self,
        document: &dyn Document,
        host: &mut dyn KeyboardHost,
        event: &KeyEvent,
    ) -> DispatchOutcome {
        handle_key_event(&self.settings, document, host, event)
    }

    /// Applies an edit, then persists
    ///
    /// The in-memory record changes first and stays changed even if the
    /// write fails; the error is logged and returned so a UI can surface it.
    pub fn update<T>(&mut self, edit: impl FnOnce(&mut Settings) -> T) -> Result<T, ConfigError> {
        let result = edit(&mut self.settings);

        if let Err(e) = self.manager.save(&mut self.settings) {
            warn!(
                path = %self.manager.settings_path().display(),
                error = %e,
                "failed to persist settings"
            );
            return Err(e);
        }

        Ok(result)
    }

    /// Restores defaults and persists
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.update(Settings::reset)
    }
}
