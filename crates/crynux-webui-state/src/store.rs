//! Background, notification and settings-modal toggles.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Point-in-time copy of the display preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiPreferences {
    /// Render the animated wave background.
    pub show_wave_bg: bool,
    /// Show a notification when the window is minimized.
    pub show_minimized_notification: bool,
    /// Settings modal visibility.
    pub show_settings_modal: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            show_wave_bg: true,
            show_minimized_notification: true,
            show_settings_modal: false,
        }
    }
}

#[derive(Debug)]
struct SystemState {
    show_wave_bg: Cell<bool>,
    show_minimized_notification: Cell<bool>,
    show_settings_modal: Cell<bool>,
}

impl From<UiPreferences> for SystemState {
    fn from(prefs: UiPreferences) -> Self {
        Self {
            show_wave_bg: Cell::new(prefs.show_wave_bg),
            show_minimized_notification: Cell::new(prefs.show_minimized_notification),
            show_settings_modal: Cell::new(prefs.show_settings_modal),
        }
    }
}

/// Handle onto one UI instance's display preferences.
///
/// Cloning the handle shares the underlying flags; [`SystemStore::new`]
/// always starts a fresh, independent set.
#[derive(Clone, Debug)]
pub struct SystemStore {
    state: Rc<SystemState>,
}

impl Default for SystemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemStore {
    /// Fresh store with the default flags.
    #[must_use]
    pub fn new() -> Self {
        Self::from_preferences(UiPreferences::default())
    }

    /// Fresh store seeded from `prefs`.
    #[must_use]
    pub fn from_preferences(prefs: UiPreferences) -> Self {
        Self {
            state: Rc::new(SystemState::from(prefs)),
        }
    }

    /// Whether the wave background is shown.
    #[must_use]
    pub fn show_wave_bg(&self) -> bool {
        self.state.show_wave_bg.get()
    }

    /// Toggle the wave background.
    pub fn set_show_wave_bg(&self, value: bool) {
        trace!(value, "show_wave_bg");
        self.state.show_wave_bg.set(value);
    }

    /// Whether the minimized-window notification is shown.
    #[must_use]
    pub fn show_minimized_notification(&self) -> bool {
        self.state.show_minimized_notification.get()
    }

    /// Toggle the minimized-window notification.
    pub fn set_show_minimized_notification(&self, value: bool) {
        trace!(value, "show_minimized_notification");
        self.state.show_minimized_notification.set(value);
    }

    /// Whether the settings modal is open.
    #[must_use]
    pub fn show_settings_modal(&self) -> bool {
        self.state.show_settings_modal.get()
    }

    /// Plain assignment of the settings modal flag.
    pub fn set_show_settings_modal(&self, value: bool) {
        trace!(value, "show_settings_modal");
        self.state.show_settings_modal.set(value);
    }

    /// Copy of the current flags.
    #[must_use]
    pub fn snapshot(&self) -> UiPreferences {
        UiPreferences {
            show_wave_bg: self.show_wave_bg(),
            show_minimized_notification: self.show_minimized_notification(),
            show_settings_modal: self.show_settings_modal(),
        }
    }
}
