//! Schema migrations for the browserstore SQLite database.
//!
//! A `schema_version` table records which migrations have been applied.
//! Each migration runs exactly once.

use rusqlite::Connection;

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Returns the current schema version from the database (0 if none applied).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Runs all pending schema migrations. Safe to call on every startup.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    // Not versioned: pragmas are per-connection.
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);

    if current < 1 {
        migration_v1(conn)?;
        record_version(conn, 1, "Clients and tabs tables")?;
    }

    if current < 2 {
        migration_v2(conn)?;
        record_version(conn, 2, "Queued sync commands, fxa_device_id index")?;
    }

    if current < CURRENT_SCHEMA_VERSION {
        log::info!(
            "Migrated schema from version {} to {}",
            current,
            CURRENT_SCHEMA_VERSION
        );
    }

    Ok(())
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<(), rusqlite::Error> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        rusqlite::params![version, now, description],
    )?;
    Ok(())
}

/// V1: clients and their tabs. Local tabs have a NULL client_guid.
fn migration_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS clients (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            modified INTEGER NOT NULL,
            type TEXT NOT NULL,
            formfactor TEXT,
            os TEXT,
            version TEXT,
            fxa_device_id TEXT
        );

        CREATE TABLE IF NOT EXISTS tabs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_guid TEXT REFERENCES clients(guid) ON DELETE CASCADE,
            url TEXT NOT NULL,
            title TEXT NOT NULL,
            history TEXT NOT NULL DEFAULT '[]',
            last_used INTEGER NOT NULL,
            icon TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tabs_client_guid ON tabs(client_guid);
        ",
    )
}

/// V2: outgoing command queue.
fn migration_v2(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS commands (
            command_id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_guid TEXT NOT NULL REFERENCES clients(guid) ON DELETE CASCADE,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_commands_client_guid ON commands(client_guid);
        CREATE INDEX IF NOT EXISTS idx_clients_fxa_device_id ON clients(fxa_device_id);
        ",
    )
}
