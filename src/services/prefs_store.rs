// browserstore preferences store
// Key/value preferences persisted as a single JSON object at the platform config path.
// Values are arbitrary JSON; reader mode stores its style dictionary here.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::platform;
use crate::types::errors::PrefsError;

/// Preference storage interface.
pub trait Prefs {
    fn dictionary_for_key(&self, key: &str) -> Option<Map<String, Value>>;
    fn set_dictionary(&mut self, key: &str, value: Map<String, Value>) -> Result<(), PrefsError>;
    fn string_for_key(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
    fn remove(&mut self, key: &str) -> Result<(), PrefsError>;
    fn clear_all(&mut self) -> Result<(), PrefsError>;
}

fn validate_key(key: &str) -> Result<(), PrefsError> {
    if key.trim().is_empty() {
        return Err(PrefsError::InvalidKey("Key cannot be empty".to_string()));
    }
    Ok(())
}

/// Preferences persisted as JSON on disk; every mutation is written through.
pub struct JsonPrefs {
    path: String,
    values: Map<String, Value>,
}

impl JsonPrefs {
    /// Creates a store at `path_override`, or `prefs.json` in the platform config dir.
    ///
    /// Nothing is read until [`JsonPrefs::load`] is called.
    pub fn new(path_override: Option<String>) -> Self {
        let path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("prefs.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            path,
            values: Map::new(),
        }
    }

    /// Loads the prefs file. A missing file yields an empty store; a file that
    /// is not a JSON object is an error.
    pub fn load(&mut self) -> Result<(), PrefsError> {
        let path = Path::new(&self.path);

        if !path.exists() {
            log::debug!("No prefs file at {}, starting empty", self.path);
            self.values = Map::new();
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| PrefsError::Io(format!("Failed to read prefs file: {}", e)))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| PrefsError::Serialization(format!("Failed to parse prefs file: {}", e)))?;

        match value {
            Value::Object(map) => {
                self.values = map;
                Ok(())
            }
            other => Err(PrefsError::Serialization(format!(
                "Prefs file must contain a JSON object, found {}",
                other
            ))),
        }
    }

    fn save(&self) -> Result<(), PrefsError> {
        let path = Path::new(&self.path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PrefsError::Io(format!("Failed to create prefs directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| PrefsError::Serialization(format!("Failed to serialize prefs: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| PrefsError::Io(format!("Failed to write prefs file: {}", e)))?;

        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Prefs for JsonPrefs {
    fn dictionary_for_key(&self, key: &str) -> Option<Map<String, Value>> {
        self.values.get(key).and_then(Value::as_object).cloned()
    }

    fn set_dictionary(&mut self, key: &str, value: Map<String, Value>) -> Result<(), PrefsError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), Value::Object(value));
        self.save()
    }

    fn string_for_key(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), Value::from(value));
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), PrefsError> {
        self.values.clear();
        self.save()
    }
}

/// In-memory preferences, for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: Map<String, Value>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw JSON value, bypassing the typed setters.
    pub fn set_raw(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

impl Prefs for MemoryPrefs {
    fn dictionary_for_key(&self, key: &str) -> Option<Map<String, Value>> {
        self.values.get(key).and_then(Value::as_object).cloned()
    }

    fn set_dictionary(&mut self, key: &str, value: Map<String, Value>) -> Result<(), PrefsError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), Value::Object(value));
        Ok(())
    }

    fn string_for_key(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), Value::from(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), PrefsError> {
        self.values.clear();
        Ok(())
    }
}
