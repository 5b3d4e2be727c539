//! Remote clients and tabs storage.
//!
//! Implements [`RemoteClientsAndTabs`] and its [`SyncCommands`] super-trait on
//! top of SQLite via `rusqlite`. Local tabs are stored with a NULL client GUID.

use std::collections::{HashMap, HashSet};

use rusqlite::{params, Connection, OptionalExtension};
use url::Url;

use crate::types::errors::RemoteTabsError;
use crate::types::remote_client::{ClientAndTabs, RemoteClient};
use crate::types::remote_tab::RemoteTab;
use crate::types::sync_command::SyncCommand;
use crate::types::Timestamp;

/// Outgoing commands queued per client until the next sync.
pub trait SyncCommands {
    fn delete_commands(&mut self) -> Result<(), RemoteTabsError>;
    fn delete_commands_for_client(&mut self, client_guid: &str) -> Result<(), RemoteTabsError>;
    fn get_commands(&self) -> Result<HashMap<String, Vec<SyncCommand>>, RemoteTabsError>;
    fn insert_command(
        &mut self,
        command: &SyncCommand,
        clients: &[RemoteClient],
    ) -> Result<usize, RemoteTabsError>;
    fn insert_commands(
        &mut self,
        commands: &[SyncCommand],
        clients: &[RemoteClient],
    ) -> Result<usize, RemoteTabsError>;
}

/// CRUD facade over the synced clients and their tabs.
pub trait RemoteClientsAndTabs: SyncCommands {
    fn wipe_clients(&mut self) -> Result<(), RemoteTabsError>;
    fn wipe_remote_tabs(&mut self) -> Result<(), RemoteTabsError>;
    fn wipe_tabs(&mut self) -> Result<(), RemoteTabsError>;
    fn get_client_guids(&self) -> Result<HashSet<String>, RemoteTabsError>;
    fn get_clients(&self) -> Result<Vec<RemoteClient>, RemoteTabsError>;
    fn get_client(&self, guid: &str) -> Result<Option<RemoteClient>, RemoteTabsError>;
    fn get_client_by_fxa_device_id(
        &self,
        fxa_device_id: &str,
    ) -> Result<Option<RemoteClient>, RemoteTabsError>;
    fn get_clients_and_tabs(&self) -> Result<Vec<ClientAndTabs>, RemoteTabsError>;
    fn get_tabs_for_client_with_guid(
        &self,
        guid: Option<&str>,
    ) -> Result<Vec<RemoteTab>, RemoteTabsError>;
    fn insert_or_update_client(&mut self, client: &RemoteClient) -> Result<usize, RemoteTabsError>;
    fn insert_or_update_clients(&mut self, clients: &[RemoteClient]) -> Result<usize, RemoteTabsError>;
    fn insert_or_update_tabs(&mut self, tabs: &[RemoteTab]) -> Result<usize, RemoteTabsError>;
    fn insert_or_update_tabs_for_client_guid(
        &mut self,
        client_guid: Option<&str>,
        tabs: &[RemoteTab],
    ) -> Result<usize, RemoteTabsError>;
    fn delete_client(&mut self, guid: &str) -> Result<(), RemoteTabsError>;
}

const CLIENT_COLUMNS: &str = "guid, name, modified, type, formfactor, os, version, fxa_device_id";

/// Clients and tabs store backed by a SQLite connection.
pub struct RemoteTabsManager<'a> {
    conn: &'a Connection,
}

/// A `tabs` row before its URLs are parsed.
struct TabRow {
    client_guid: Option<String>,
    url: String,
    title: String,
    history: String,
    last_used: i64,
    icon: Option<String>,
}

fn timestamp_to_sql(ts: Timestamp) -> i64 {
    i64::try_from(ts).unwrap_or(i64::MAX)
}

fn timestamp_from_sql(value: i64) -> Timestamp {
    Timestamp::try_from(value).unwrap_or(0)
}

impl<'a> RemoteTabsManager<'a> {
    /// Creates a new `RemoteTabsManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_client(row: &rusqlite::Row) -> rusqlite::Result<RemoteClient> {
        Ok(RemoteClient {
            guid: row.get(0)?,
            name: row.get(1)?,
            modified: timestamp_from_sql(row.get(2)?),
            client_type: row.get(3)?,
            form_factor: row.get(4)?,
            os: row.get(5)?,
            version: row.get(6)?,
            fxa_device_id: row.get(7)?,
        })
    }

    fn row_to_tab_row(row: &rusqlite::Row) -> rusqlite::Result<TabRow> {
        Ok(TabRow {
            client_guid: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            history: row.get(3)?,
            last_used: row.get(4)?,
            icon: row.get(5)?,
        })
    }

    fn parse_url(raw: &str) -> Result<Url, RemoteTabsError> {
        Url::parse(raw).map_err(|e| RemoteTabsError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    fn tab_from_row(row: TabRow) -> Result<RemoteTab, RemoteTabsError> {
        let history_strings: Vec<String> = serde_json::from_str(&row.history)?;
        let history = history_strings
            .iter()
            .map(|s| Self::parse_url(s))
            .collect::<Result<Vec<_>, _>>()?;
        let icon = match row.icon {
            Some(ref raw) => Some(Self::parse_url(raw)?),
            None => None,
        };

        Ok(RemoteTab {
            client_guid: row.client_guid,
            url: Self::parse_url(&row.url)?,
            title: row.title,
            history,
            last_used: timestamp_from_sql(row.last_used),
            icon,
        })
    }

    fn query_clients(&self, sql: &str, param: Option<&str>) -> Result<Vec<RemoteClient>, RemoteTabsError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match param {
            Some(p) => stmt.query_map(params![p], Self::row_to_client)?,
            None => stmt.query_map([], Self::row_to_client)?,
        };

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn write_client(conn: &Connection, client: &RemoteClient) -> Result<usize, RemoteTabsError> {
        let guid = client
            .guid
            .as_deref()
            .ok_or_else(|| RemoteTabsError::MissingGuid(client.name.clone()))?;

        // Upsert in place: REPLACE would delete the row and cascade to its tabs.
        let affected = conn.execute(
            "INSERT INTO clients (guid, name, modified, type, formfactor, os, version, fxa_device_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
             ON CONFLICT(guid) DO UPDATE SET \
                 name = excluded.name, modified = excluded.modified, type = excluded.type, \
                 formfactor = excluded.formfactor, os = excluded.os, version = excluded.version, \
                 fxa_device_id = excluded.fxa_device_id",
            params![
                guid,
                client.name,
                timestamp_to_sql(client.modified),
                client.client_type,
                client.form_factor,
                client.os,
                client.version,
                client.fxa_device_id,
            ],
        )?;
        Ok(affected)
    }

    fn client_exists(&self, guid: &str) -> Result<bool, RemoteTabsError> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM clients WHERE guid = ?1", params![guid], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }
}

impl<'a> SyncCommands for RemoteTabsManager<'a> {
    fn delete_commands(&mut self) -> Result<(), RemoteTabsError> {
        self.conn.execute("DELETE FROM commands", [])?;
        Ok(())
    }

    fn delete_commands_for_client(&mut self, client_guid: &str) -> Result<(), RemoteTabsError> {
        let deleted = self
            .conn
            .execute("DELETE FROM commands WHERE client_guid = ?1", params![client_guid])?;
        log::debug!("Deleted {} queued commands for client {}", deleted, client_guid);
        Ok(())
    }

    /// Returns queued commands grouped by target client, oldest first.
    fn get_commands(&self) -> Result<HashMap<String, Vec<SyncCommand>>, RemoteTabsError> {
        let mut stmt = self
            .conn
            .prepare("SELECT command_id, client_guid, value FROM commands ORDER BY command_id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(SyncCommand {
                command_id: row.get(0)?,
                client_guid: row.get(1)?,
                value: row.get(2)?,
            })
        })?;

        let mut grouped: HashMap<String, Vec<SyncCommand>> = HashMap::new();
        for row in rows {
            let command = row?;
            if let Some(guid) = command.client_guid.clone() {
                grouped.entry(guid).or_default().push(command);
            }
        }
        Ok(grouped)
    }

    fn insert_command(
        &mut self,
        command: &SyncCommand,
        clients: &[RemoteClient],
    ) -> Result<usize, RemoteTabsError> {
        self.insert_commands(std::slice::from_ref(command), clients)
    }

    /// Queues every command for every client that has a GUID.
    /// Returns the number of rows inserted.
    fn insert_commands(
        &mut self,
        commands: &[SyncCommand],
        clients: &[RemoteClient],
    ) -> Result<usize, RemoteTabsError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        for client in clients {
            let Some(guid) = client.guid.as_deref() else {
                log::warn!("Skipping command for client without GUID: {}", client.name);
                continue;
            };
            for command in commands {
                inserted += tx.execute(
                    "INSERT INTO commands (client_guid, value) VALUES (?1, ?2)",
                    params![guid, command.value],
                )?;
            }
        }
        tx.commit()?;
        log::debug!("Queued {} commands", inserted);
        Ok(inserted)
    }
}

impl<'a> RemoteClientsAndTabs for RemoteTabsManager<'a> {
    /// Removes all clients; their tabs and commands cascade. Local tabs survive.
    fn wipe_clients(&mut self) -> Result<(), RemoteTabsError> {
        let deleted = self.conn.execute("DELETE FROM clients", [])?;
        log::debug!("Wiped {} clients", deleted);
        Ok(())
    }

    fn wipe_remote_tabs(&mut self) -> Result<(), RemoteTabsError> {
        self.conn
            .execute("DELETE FROM tabs WHERE client_guid IS NOT NULL", [])?;
        Ok(())
    }

    fn wipe_tabs(&mut self) -> Result<(), RemoteTabsError> {
        self.conn.execute("DELETE FROM tabs", [])?;
        Ok(())
    }

    fn get_client_guids(&self) -> Result<HashSet<String>, RemoteTabsError> {
        let mut stmt = self.conn.prepare("SELECT guid FROM clients")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut guids = HashSet::new();
        for row in rows {
            guids.insert(row?);
        }
        Ok(guids)
    }

    /// Lists all clients, most recently modified first.
    fn get_clients(&self) -> Result<Vec<RemoteClient>, RemoteTabsError> {
        let sql = format!("SELECT {} FROM clients ORDER BY modified DESC, guid ASC", CLIENT_COLUMNS);
        self.query_clients(&sql, None)
    }

    fn get_client(&self, guid: &str) -> Result<Option<RemoteClient>, RemoteTabsError> {
        let sql = format!("SELECT {} FROM clients WHERE guid = ?1", CLIENT_COLUMNS);
        Ok(self.query_clients(&sql, Some(guid))?.into_iter().next())
    }

    fn get_client_by_fxa_device_id(
        &self,
        fxa_device_id: &str,
    ) -> Result<Option<RemoteClient>, RemoteTabsError> {
        let sql = format!(
            "SELECT {} FROM clients WHERE fxa_device_id = ?1 ORDER BY modified DESC LIMIT 1",
            CLIENT_COLUMNS
        );
        Ok(self.query_clients(&sql, Some(fxa_device_id))?.into_iter().next())
    }

    /// Returns every client with its tabs. Clients without tabs get an empty list.
    fn get_clients_and_tabs(&self) -> Result<Vec<ClientAndTabs>, RemoteTabsError> {
        let clients = self.get_clients()?;

        let mut stmt = self.conn.prepare(
            "SELECT client_guid, url, title, history, last_used, icon FROM tabs \
             WHERE client_guid IS NOT NULL ORDER BY last_used DESC, id ASC",
        )?;
        let rows = stmt.query_map([], Self::row_to_tab_row)?;

        let mut tabs_by_client: HashMap<String, Vec<RemoteTab>> = HashMap::new();
        for row in rows {
            let tab = Self::tab_from_row(row?)?;
            if let Some(guid) = tab.client_guid.clone() {
                tabs_by_client.entry(guid).or_default().push(tab);
            }
        }

        Ok(clients
            .into_iter()
            .map(|client| {
                let tabs = client
                    .guid
                    .as_ref()
                    .and_then(|g| tabs_by_client.remove(g))
                    .unwrap_or_default();
                ClientAndTabs::new(client, tabs)
            })
            .collect())
    }

    /// Tabs for one client (or the local device for `None`), most recent first.
    fn get_tabs_for_client_with_guid(
        &self,
        guid: Option<&str>,
    ) -> Result<Vec<RemoteTab>, RemoteTabsError> {
        let mut stmt = self.conn.prepare(
            "SELECT client_guid, url, title, history, last_used, icon FROM tabs \
             WHERE client_guid IS ?1 ORDER BY last_used DESC, id ASC",
        )?;
        let rows = stmt.query_map(params![guid], Self::row_to_tab_row)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(Self::tab_from_row(row?)?);
        }
        Ok(results)
    }

    fn insert_or_update_client(&mut self, client: &RemoteClient) -> Result<usize, RemoteTabsError> {
        let affected = Self::write_client(self.conn, client)?;
        log::debug!("Stored client {:?}", client.guid);
        Ok(affected)
    }

    fn insert_or_update_clients(&mut self, clients: &[RemoteClient]) -> Result<usize, RemoteTabsError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut affected = 0;
        for client in clients {
            affected += Self::write_client(&tx, client)?;
        }
        tx.commit()?;
        log::debug!("Stored {} clients", affected);
        Ok(affected)
    }

    fn insert_or_update_tabs(&mut self, tabs: &[RemoteTab]) -> Result<usize, RemoteTabsError> {
        self.insert_or_update_tabs_for_client_guid(None, tabs)
    }

    /// Replaces the whole tab set of a client in one transaction.
    ///
    /// Tabs whose URL is not syncable are dropped. Returns the number of
    /// tabs written.
    fn insert_or_update_tabs_for_client_guid(
        &mut self,
        client_guid: Option<&str>,
        tabs: &[RemoteTab],
    ) -> Result<usize, RemoteTabsError> {
        if let Some(guid) = client_guid {
            if !self.client_exists(guid)? {
                return Err(RemoteTabsError::NotFound(guid.to_string()));
            }
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tabs WHERE client_guid IS ?1", params![client_guid])?;

        let mut inserted = 0;
        for tab in tabs {
            if !RemoteTab::should_include_url(&tab.url) {
                log::warn!("Not storing tab with excluded URL: {}", tab.url);
                continue;
            }
            let history: Vec<&str> = tab.history.iter().map(Url::as_str).collect();
            let history_json = serde_json::to_string(&history)?;
            inserted += tx.execute(
                "INSERT INTO tabs (client_guid, url, title, history, last_used, icon) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    client_guid,
                    tab.url.as_str(),
                    tab.title,
                    history_json,
                    timestamp_to_sql(tab.last_used),
                    tab.icon.as_ref().map(Url::as_str),
                ],
            )?;
        }
        tx.commit()?;

        log::debug!(
            "Replaced tabs for client {}: {} of {} stored",
            client_guid.unwrap_or("<local>"),
            inserted,
            tabs.len()
        );
        Ok(inserted)
    }

    /// Deletes a client together with its tabs and queued commands.
    fn delete_client(&mut self, guid: &str) -> Result<(), RemoteTabsError> {
        let affected = self
            .conn
            .execute("DELETE FROM clients WHERE guid = ?1", params![guid])?;

        if affected == 0 {
            return Err(RemoteTabsError::NotFound(guid.to_string()));
        }
        log::debug!("Deleted client {}", guid);
        Ok(())
    }
}
