//! Boolean UI preferences (`darkTheme`, `sidebar-collapsed`).
//!
//! Absent or malformed values read as `false`; failed writes are logged.

use crate::storage::{keys, read_json, write_json, LocalStorage};
use log::warn;

pub struct PreferencesStore<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> PreferencesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn dark_theme(&self) -> bool {
        self.read_flag(keys::DARK_THEME)
    }

    pub fn set_dark_theme(&self, enabled: bool) {
        self.write_flag(keys::DARK_THEME, enabled);
    }

    /// Flips the theme and returns the new value.
    pub fn toggle_theme(&self) -> bool {
        let enabled = !self.dark_theme();
        self.set_dark_theme(enabled);
        enabled
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.read_flag(keys::SIDEBAR_COLLAPSED)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.write_flag(keys::SIDEBAR_COLLAPSED, collapsed);
    }

    /// Flips the sidebar state and returns the new value.
    pub fn toggle_sidebar(&self) -> bool {
        let collapsed = !self.sidebar_collapsed();
        self.set_sidebar_collapsed(collapsed);
        collapsed
    }

    fn read_flag(&self, key: &str) -> bool {
        read_json::<bool>(&self.storage, key)
            .unwrap_or_else(|err| {
                warn!("event=preference_load module=store status=default key={key} error={err}");
                None
            })
            .unwrap_or(false)
    }

    fn write_flag(&self, key: &str, value: bool) {
        if let Err(err) = write_json(&self.storage, key, &value) {
            warn!("event=preference_save module=store status=error key={key} error={err}");
        }
    }
}
