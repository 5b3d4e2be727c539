//! Theme Engine: tracks the app-wide light/dark/system theme selection.

use crate::types::theme::{AppTheme, ThemeMode};

/// Anything that can report the theme the app is currently rendering with.
pub trait ThemeProvider {
    fn current_theme(&self) -> AppTheme;
}

/// Holds the user's theme selection and resolves `System` against the host.
pub struct ThemeManager {
    mode: ThemeMode,
}

impl ThemeManager {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn change_current_theme(&mut self, mode: ThemeMode) {
        log::debug!("App theme changed to {}", mode.as_str());
        self.mode = mode;
    }

    /// Reads the host preference. Without a desktop settings service we
    /// check `GTK_THEME`; anything not mentioning "dark" is light.
    pub fn detect_system_theme() -> AppTheme {
        match std::env::var("GTK_THEME") {
            Ok(name) if name.to_lowercase().contains("dark") => AppTheme::Dark,
            _ => AppTheme::Light,
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(ThemeMode::System)
    }
}

impl ThemeProvider for ThemeManager {
    fn current_theme(&self) -> AppTheme {
        match self.mode {
            ThemeMode::Light => AppTheme::Light,
            ThemeMode::Dark => AppTheme::Dark,
            ThemeMode::System => Self::detect_system_theme(),
        }
    }
}

impl ThemeProvider for AppTheme {
    fn current_theme(&self) -> AppTheme {
        *self
    }
}
