// browserstore shared type definitions
// Each submodule defines records used by the storage and preference layers.

pub mod errors;
pub mod reader;
pub mod remote_client;
pub mod remote_tab;
pub mod sync_command;
pub mod theme;

/// Milliseconds since the UNIX epoch.
pub type Timestamp = u64;

