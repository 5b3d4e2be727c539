use serde::{Deserialize, Serialize};
use serde_json::json;

/// A command queued for delivery to another client on the next sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCommand {
    /// Row id once stored; `None` for commands not yet queued.
    pub command_id: Option<i64>,
    /// JSON-encoded command body.
    pub value: String,
    pub client_guid: Option<String>,
}

impl SyncCommand {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            command_id: None,
            value: value.into(),
            client_guid: None,
        }
    }

    /// Builds a "send tab" command asking the receiver to open `url`.
    pub fn display_uri(url: &str, title: &str, sender_guid: &str) -> Self {
        let body = json!({
            "command": "displayURI",
            "args": [url, sender_guid, title],
        });
        Self::new(body.to_string())
    }

    pub fn with_client_guid(&self, client_guid: Option<String>) -> Self {
        Self {
            client_guid,
            ..self.clone()
        }
    }
}
