// browserstore services
// Services provide preference storage, app theme tracking and reader mode style handling.

pub mod prefs_store;
pub mod reader_mode;
pub mod theme_engine;
