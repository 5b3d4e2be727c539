//! RPC method handler for the browserstore JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. `handle_method`
//! dispatches a method call to the store, prefs and theme state held by [`App`].

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::remote_tabs_manager::{RemoteClientsAndTabs, RemoteTabsManager, SyncCommands};
use crate::services::reader_mode;
use crate::services::theme_engine::ThemeProvider;
use crate::types::reader::ReaderModeStyle;
use crate::types::remote_client::RemoteClient;
use crate::types::remote_tab::{RemoteTab, RemoteTabRecord};
use crate::types::sync_command::SyncCommand;
use crate::types::theme::ThemeMode;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

/// Optional client GUID; absent or null selects the local device.
fn client_guid_param(params: &Value) -> Option<&str> {
    params.get("client_guid").and_then(Value::as_str)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Clients ───
        "clients.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = RemoteTabsManager::new(a.db.connection());
            let clients = mgr.get_clients().map_err(|e| e.to_string())?;
            to_json(&clients)
        }
        "clients.get" => {
            let guid = str_param(params, "guid")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = RemoteTabsManager::new(a.db.connection());
            let client = mgr.get_client(guid).map_err(|e| e.to_string())?;
            to_json(&client)
        }
        "clients.upsert" => {
            let client_value = params.get("client").cloned().ok_or("missing client")?;
            let client: RemoteClient = serde_json::from_value(client_value)
                .map_err(|e| format!("invalid client: {}", e))?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            let count = mgr.insert_or_update_client(&client).map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "clients.delete" => {
            let guid = str_param(params, "guid")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            mgr.delete_client(guid).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "clients.wipe" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            mgr.wipe_clients().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Tabs ───
        "tabs.list" => {
            let guid = client_guid_param(params);
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = RemoteTabsManager::new(a.db.connection());
            let tabs = mgr.get_tabs_for_client_with_guid(guid).map_err(|e| e.to_string())?;
            let records: Vec<RemoteTabRecord> = tabs.iter().map(RemoteTab::to_remote_tab_record).collect();
            to_json(&records)
        }
        "tabs.replace" => {
            let guid = client_guid_param(params);
            let records_value = params.get("tabs").cloned().ok_or("missing tabs")?;
            let records: Vec<RemoteTabRecord> = serde_json::from_value(records_value)
                .map_err(|e| format!("invalid tabs: {}", e))?;
            let tabs: Vec<RemoteTab> = records
                .iter()
                .filter_map(|r| RemoteTab::from_record(guid.map(str::to_string), r))
                .collect();
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            let count = mgr
                .insert_or_update_tabs_for_client_guid(guid, &tabs)
                .map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "tabs.all" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = RemoteTabsManager::new(a.db.connection());
            let all = mgr.get_clients_and_tabs().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = all
                .iter()
                .map(|ct| {
                    let records: Vec<RemoteTabRecord> =
                        ct.tabs.iter().map(RemoteTab::to_remote_tab_record).collect();
                    json!({"client": ct.client, "tabs": records})
                })
                .collect();
            Ok(json!(arr))
        }

        // ─── Commands ───
        "commands.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = RemoteTabsManager::new(a.db.connection());
            let commands = mgr.get_commands().map_err(|e| e.to_string())?;
            to_json(&commands)
        }
        "commands.send_uri" => {
            let url = str_param(params, "url")?;
            let title = params.get("title").and_then(Value::as_str).unwrap_or("");
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("invalid url: must start with http:// or https://".to_string());
            }
            let guids: Vec<&str> = params
                .get("client_guids")
                .and_then(Value::as_array)
                .ok_or("missing client_guids")?
                .iter()
                .filter_map(Value::as_str)
                .collect();

            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            let mut targets = Vec::new();
            for guid in guids {
                match mgr.get_client(guid).map_err(|e| e.to_string())? {
                    Some(client) => targets.push(client),
                    None => return Err(format!("unknown client: {}", guid)),
                }
            }
            let command = SyncCommand::display_uri(url, title, a.local_client_guid());
            let count = mgr.insert_command(&command, &targets).map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "commands.clear" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = RemoteTabsManager::new(a.db.connection());
            let result = match client_guid_param(params) {
                Some(guid) => mgr.delete_commands_for_client(guid),
                None => mgr.delete_commands(),
            };
            result.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Reader mode ───
        "reader.style.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let style = reader_mode::load_style(&a.prefs, &a.theme_manager).unwrap_or_else(|| {
                let mut style = ReaderModeStyle::default();
                style.ensure_preferred_color_theme_if_needed(a.theme_manager.current_theme());
                style
            });
            Ok(Value::Object(style.encode_as_dictionary()))
        }
        "reader.style.set" => {
            let dict = params.as_object().ok_or("params must be an object")?;
            let style = ReaderModeStyle::from_dictionary(dict).ok_or("invalid reader style")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            reader_mode::save_style(&mut a.prefs, &style).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Theme ───
        "theme.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "mode": a.theme_manager.mode(),
                "current": a.theme_manager.current_theme(),
            }))
        }
        "theme.set" => {
            let mode: ThemeMode = str_param(params, "mode")?
                .parse()
                .map_err(|e: crate::types::errors::ThemeError| e.to_string())?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.set_theme_mode(mode).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
