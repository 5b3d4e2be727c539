use browserstore::types::errors::*;

// === RemoteTabsError Tests ===

#[test]
fn remote_tabs_error_display_variants() {
    assert_eq!(
        RemoteTabsError::NotFound("client-1".to_string()).to_string(),
        "Remote client not found: client-1"
    );
    assert_eq!(
        RemoteTabsError::MissingGuid("Phone".to_string()).to_string(),
        "Remote client has no GUID: Phone"
    );
    assert_eq!(
        RemoteTabsError::InvalidUrl("nope".to_string()).to_string(),
        "Invalid tab URL: nope"
    );
    assert_eq!(
        RemoteTabsError::Serialization("bad history".to_string()).to_string(),
        "Remote tabs serialization error: bad history"
    );
}

#[test]
fn remote_tabs_error_wraps_rusqlite() {
    let err: RemoteTabsError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(err.to_string().starts_with("Remote tabs database error:"));
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_some());
}

#[test]
fn remote_tabs_error_from_serde_json() {
    let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
    let err: RemoteTabsError = json_err.into();
    assert!(matches!(err, RemoteTabsError::Serialization(_)));
}

// === PrefsError Tests ===

#[test]
fn prefs_error_display_variants() {
    assert_eq!(PrefsError::Io("denied".to_string()).to_string(), "Prefs I/O error: denied");
    assert_eq!(
        PrefsError::Serialization("not an object".to_string()).to_string(),
        "Prefs serialization error: not an object"
    );
    assert_eq!(PrefsError::InvalidKey("".to_string()).to_string(), "Invalid prefs key: ");
}

// === ThemeError Tests ===

#[test]
fn theme_error_display() {
    let err: Box<dyn std::error::Error> = Box::new(ThemeError::UnknownTheme("neon".to_string()));
    assert_eq!(err.to_string(), "Unknown theme: neon");
    assert!(err.source().is_none());
}
