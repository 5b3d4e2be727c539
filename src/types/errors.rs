// === RemoteTabsError ===

/// Errors related to remote client and tab storage.
#[derive(Debug, thiserror::Error)]
pub enum RemoteTabsError {
    /// Client with the given GUID was not found.
    #[error("Remote client not found: {0}")]
    NotFound(String),
    /// A client record without a GUID cannot be stored.
    #[error("Remote client has no GUID: {0}")]
    MissingGuid(String),
    /// A stored URL could not be parsed.
    #[error("Invalid tab URL: {0}")]
    InvalidUrl(String),
    /// Failed to encode or decode tab history or a command payload.
    #[error("Remote tabs serialization error: {0}")]
    Serialization(String),
    /// Database operation failed.
    #[error("Remote tabs database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl From<serde_json::Error> for RemoteTabsError {
    fn from(err: serde_json::Error) -> Self {
        RemoteTabsError::Serialization(err.to_string())
    }
}

// === PrefsError ===

/// Errors related to the preferences store.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    /// An I/O error occurred while reading or writing the prefs file.
    #[error("Prefs I/O error: {0}")]
    Io(String),
    /// The prefs file is not a JSON object, or a value failed to serialize.
    #[error("Prefs serialization error: {0}")]
    Serialization(String),
    /// The provided preference key is invalid.
    #[error("Invalid prefs key: {0}")]
    InvalidKey(String),
}

// === ThemeError ===

/// Errors related to app theme selection.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme name is not one of `light`, `dark` or `system`.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}
