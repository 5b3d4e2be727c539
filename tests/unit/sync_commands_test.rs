//! Unit tests for the queued sync commands half of the store.

use browserstore::database::Database;
use browserstore::managers::remote_tabs_manager::{RemoteClientsAndTabs, RemoteTabsManager, SyncCommands};
use browserstore::types::remote_client::RemoteClient;
use browserstore::types::sync_command::SyncCommand;

fn setup_with_clients(db: &Database) -> Vec<RemoteClient> {
    let clients = vec![
        RemoteClient::new(Some("a".to_string()), "Laptop", 1, "desktop"),
        RemoteClient::new(Some("b".to_string()), "Phone", 2, "mobile"),
    ];
    let mut mgr = RemoteTabsManager::new(db.connection());
    mgr.insert_or_update_clients(&clients).unwrap();
    clients
}

#[test]
fn test_insert_command_for_each_client() {
    let db = Database::open_in_memory().unwrap();
    let clients = setup_with_clients(&db);
    let mut mgr = RemoteTabsManager::new(db.connection());

    let cmd = SyncCommand::display_uri("https://example.com/", "Example", "me");
    assert_eq!(mgr.insert_command(&cmd, &clients).unwrap(), 2);

    let commands = mgr.get_commands().unwrap();
    assert_eq!(commands.len(), 2);
    let for_a = &commands["a"];
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].value, cmd.value);
    assert_eq!(for_a[0].client_guid.as_deref(), Some("a"));
    assert!(for_a[0].command_id.is_some());
}

#[test]
fn test_insert_commands_keeps_order_and_skips_guidless_clients() {
    let db = Database::open_in_memory().unwrap();
    let mut clients = setup_with_clients(&db);
    clients.push(RemoteClient::new(None, "Unknown", 3, "mobile"));
    let mut mgr = RemoteTabsManager::new(db.connection());

    let commands = [SyncCommand::new("{\"n\":1}"), SyncCommand::new("{\"n\":2}")];
    assert_eq!(mgr.insert_commands(&commands, &clients).unwrap(), 4);

    let stored = mgr.get_commands().unwrap();
    let values: Vec<&str> = stored["b"].iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["{\"n\":1}", "{\"n\":2}"]);
}

#[test]
fn test_delete_commands() {
    let db = Database::open_in_memory().unwrap();
    let clients = setup_with_clients(&db);
    let mut mgr = RemoteTabsManager::new(db.connection());
    mgr.insert_command(&SyncCommand::new("{}"), &clients).unwrap();

    mgr.delete_commands_for_client("a").unwrap();
    let remaining = mgr.get_commands().unwrap();
    assert!(!remaining.contains_key("a"));
    assert!(remaining.contains_key("b"));

    mgr.delete_commands().unwrap();
    assert!(mgr.get_commands().unwrap().is_empty());
}

#[test]
fn test_deleting_client_drops_its_commands() {
    let db = Database::open_in_memory().unwrap();
    let clients = setup_with_clients(&db);
    let mut mgr = RemoteTabsManager::new(db.connection());
    mgr.insert_command(&SyncCommand::new("{}"), &clients).unwrap();

    mgr.delete_client("b").unwrap();
    let remaining = mgr.get_commands().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains_key("a"));
}
