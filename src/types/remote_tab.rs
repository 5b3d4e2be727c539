use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::Timestamp;

/// Scheme used by pages the browser serves itself.
pub const INTERNAL_SCHEME: &str = "internal";

/// Paths of the local web server that hosts internal pages on `localhost`.
const INTERNAL_LOCALHOST_PATHS: [&str; 3] = ["/about/", "/reader-mode/", "/errors/"];

/// A tab open on some client, as stored locally or received through sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTab {
    /// Owning client. `None` is the local device.
    pub client_guid: Option<String>,
    pub url: Url,
    pub title: String,
    /// Back-history, most recent first.
    pub history: Vec<Url>,
    /// Milliseconds since the UNIX epoch.
    pub last_used: Timestamp,
    pub icon: Option<Url>,
}

/// Wire representation of a tab inside a sync payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTabRecord {
    pub title: String,
    pub url_history: Vec<String>,
    pub icon: Option<String>,
    pub last_used: i64,
}

fn is_internal_url(url: &Url) -> bool {
    if url.scheme() == INTERNAL_SCHEME {
        return true;
    }
    let on_localhost = matches!(url.scheme(), "http" | "https")
        && url.host_str() == Some("localhost")
        && url.port().is_some();
    on_localhost
        && INTERNAL_LOCALHOST_PATHS
            .iter()
            .any(|prefix| url.path().starts_with(prefix))
}

impl RemoteTab {
    pub fn new(
        client_guid: Option<String>,
        url: Url,
        title: impl Into<String>,
        history: Vec<Url>,
        last_used: Timestamp,
        icon: Option<Url>,
    ) -> Self {
        Self {
            client_guid,
            url,
            title: title.into(),
            history,
            last_used,
            icon,
        }
    }

    /// Whether a tab showing `url` may be synced to other devices.
    ///
    /// Internal pages and `javascript:` URLs are never synced, and a URL
    /// must carry a host.
    pub fn should_include_url(url: &Url) -> bool {
        if is_internal_url(url) {
            return false;
        }
        if url.scheme() == "javascript" {
            return false;
        }
        url.host_str().map_or(false, |host| !host.is_empty())
    }

    pub fn with_client_guid(&self, client_guid: Option<String>) -> RemoteTab {
        RemoteTab {
            client_guid,
            ..self.clone()
        }
    }

    pub fn to_remote_tab_record(&self) -> RemoteTabRecord {
        RemoteTabRecord {
            title: self.title.clone(),
            url_history: self.history.iter().map(|u| u.as_str().to_string()).collect(),
            icon: self.icon.as_ref().map(|u| u.as_str().to_string()),
            last_used: i64::try_from(self.last_used).unwrap_or(i64::MAX),
        }
    }

    /// Builds a tab from a sync record. The first parseable history entry
    /// becomes the tab URL; returns `None` when no entry parses.
    pub fn from_record(client_guid: Option<String>, record: &RemoteTabRecord) -> Option<RemoteTab> {
        let history: Vec<Url> = record
            .url_history
            .iter()
            .filter_map(|s| match Url::parse(s) {
                Ok(u) => Some(u),
                Err(e) => {
                    log::warn!("Dropping unparseable history entry {:?}: {}", s, e);
                    None
                }
            })
            .collect();
        let url = history.first()?.clone();
        let icon = record.icon.as_deref().and_then(|s| Url::parse(s).ok());

        Some(RemoteTab {
            client_guid,
            url,
            title: record.title.clone(),
            history,
            last_used: u64::try_from(record.last_used).unwrap_or(0),
            icon,
        })
    }
}

impl fmt::Display for RemoteTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<RemoteTab clientGUID: {}, URL: {}, title: {}, lastUsed: {}>",
            self.client_guid.as_deref().unwrap_or("nil"),
            self.url,
            self.title,
            self.last_used
        )
    }
}
