// browserstore state managers
// Managers own stateful storage operations over the SQLite connection.

pub mod remote_tabs_manager;
