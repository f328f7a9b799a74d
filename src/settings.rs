//! Settings
//!
//! Locale and theme preferences, persisted independently of the cart.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{persist::Persistence, storage::KeyValueStorage};

/// Storage key for persisted settings.
pub const SETTINGS_STORAGE_KEY: &str = "timehouse-settings";

/// Unrecognised locale or theme name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,

    /// Arabic
    Ar,
}

impl Locale {
    /// Whether text in this locale runs right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    /// The other supported locale.
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }

    /// Locale code, e.g. `en`.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            other => Err(ParseSettingError {
                kind: "locale",
                value: other.to_string(),
            }),
        }
    }
}

/// Colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    Light,

    /// Dark background
    #[default]
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseSettingError {
                kind: "theme",
                value: other.to_string(),
            }),
        }
    }
}

/// Persisted preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    /// Display language
    pub locale: Locale,

    /// Colour scheme
    pub theme: Theme,
}

/// Owns user preferences for a session.
#[derive(Debug)]
pub struct SettingsStore {
    state: SettingsState,
    persistence: Persistence<SettingsState>,
}

impl SettingsStore {
    /// Restores settings from storage, falling back to defaults.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let persistence = Persistence::new(SETTINGS_STORAGE_KEY, storage);
        let state = persistence.load().unwrap_or_default();

        Self { state, persistence }
    }

    /// Current preferences.
    pub fn state(&self) -> SettingsState {
        self.state
    }

    /// Current locale.
    pub fn locale(&self) -> Locale {
        self.state.locale
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Sets the locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.state.locale = locale;
        self.persist();
    }

    /// Sets the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.persist();
    }

    /// Switches between English and Arabic.
    pub fn toggle_locale(&mut self) {
        self.set_locale(self.state.locale.toggled());
    }

    fn persist(&self) {
        debug!(locale = %self.state.locale, theme = %self.state.theme, "settings changed");

        self.persistence.save(&self.state);
    }
}
