use std::fmt;

use serde::{Deserialize, Serialize};

use super::remote_tab::RemoteTab;
use super::Timestamp;

/// A device participating in tab sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteClient {
    pub guid: Option<String>,
    pub name: String,
    pub modified: Timestamp,
    /// "mobile" or "desktop".
    #[serde(rename = "type")]
    pub client_type: String,
    pub form_factor: Option<String>,
    pub os: Option<String>,
    pub version: Option<String>,
    pub fxa_device_id: Option<String>,
}

impl RemoteClient {
    /// Creates a client record with only the required fields set.
    pub fn new(guid: Option<String>, name: impl Into<String>, modified: Timestamp, client_type: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            modified,
            client_type: client_type.into(),
            form_factor: None,
            os: None,
            version: None,
            fxa_device_id: None,
        }
    }
}

/// A client together with the tabs it has open.
///
/// Assembled per query; never persisted as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAndTabs {
    pub client: RemoteClient,
    pub tabs: Vec<RemoteTab>,
}

impl ClientAndTabs {
    pub fn new(client: RemoteClient, tabs: Vec<RemoteTab>) -> Self {
        Self { client, tabs }
    }
}

impl fmt::Display for ClientAndTabs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Client guid: {}, {} tabs.>",
            self.client.guid.as_deref().unwrap_or("nil"),
            self.tabs.len()
        )
    }
}
