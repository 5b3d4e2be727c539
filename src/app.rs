//! App core for browserstore.
//!
//! Central struct holding the database, preferences and theme state used by
//! the RPC handler.

use crate::database::connection::Database;
use crate::services::prefs_store::{JsonPrefs, Prefs};
use crate::services::theme_engine::ThemeManager;
use crate::types::theme::ThemeMode;

/// Pref key holding this device's client GUID.
pub const LOCAL_CLIENT_GUID_KEY: &str = "clients.local.guid";
/// Pref key holding the app theme selection.
pub const THEME_MODE_KEY: &str = "theme.mode";

/// Central application state.
///
/// `RemoteTabsManager` is created on demand via `db.connection()` because it
/// borrows the connection.
pub struct App {
    pub db: Database,
    pub prefs: JsonPrefs,
    pub theme_manager: ThemeManager,
    local_client_guid: String,
}

impl App {
    /// Opens the database at `db_path` and the prefs file at `prefs_path`
    /// (platform default when `None`).
    pub fn new(db_path: &str, prefs_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;

        let mut prefs = JsonPrefs::new(prefs_path);
        prefs.load()?;

        let mode = match prefs.string_for_key(THEME_MODE_KEY) {
            Some(raw) => raw.parse::<ThemeMode>().unwrap_or_else(|e| {
                log::warn!("{}; falling back to system theme", e);
                ThemeMode::System
            }),
            None => ThemeMode::System,
        };
        let theme_manager = ThemeManager::new(mode);

        let local_client_guid = match prefs.string_for_key(LOCAL_CLIENT_GUID_KEY) {
            Some(guid) => guid,
            None => {
                let guid = uuid::Uuid::new_v4().to_string();
                prefs.set_string(LOCAL_CLIENT_GUID_KEY, &guid)?;
                log::info!("Generated local client GUID {}", guid);
                guid
            }
        };

        Ok(Self {
            db,
            prefs,
            theme_manager,
            local_client_guid,
        })
    }

    /// GUID this device uses as the sender of outgoing commands.
    pub fn local_client_guid(&self) -> &str {
        &self.local_client_guid
    }

    /// Switches the app theme and remembers the choice.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> Result<(), Box<dyn std::error::Error>> {
        self.theme_manager.change_current_theme(mode);
        self.prefs.set_string(THEME_MODE_KEY, mode.as_str())?;
        Ok(())
    }
}
