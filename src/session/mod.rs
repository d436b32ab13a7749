//! Persisted authentication and profile cache.
//!
//! One JSON object stored under a fixed key. Writes are shallow merges, logout
//! removes the record entirely. The store is injected into whatever needs it
//! (usually behind an `Arc`) instead of being reached through a global.

mod backend;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::SessionError;
use crate::types::UserType;

/// Storage key of the session record
pub const SESSION_KEY: &str = "userData";

pub const TOKEN: &str = "token";
pub const USER_TYPE: &str = "userType";
pub const HIGHEST_USER_TYPE: &str = "highestUserType";
pub const PROFILE_DATA: &str = "profileData";

/// Snapshot of the session record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Map<String, Value>);

impl SessionRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.get(TOKEN).and_then(Value::as_str)
    }

    pub fn user_type(&self) -> Option<&str> {
        self.0.get(USER_TYPE).and_then(Value::as_str)
    }

    pub fn highest_user_type(&self) -> Option<&str> {
        self.0.get(HIGHEST_USER_TYPE).and_then(Value::as_str)
    }

    pub fn profile_data(&self) -> Option<&Value> {
        self.0.get(PROFILE_DATA)
    }

    /// Shallow merge: every top-level key of `partial` replaces ours
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.0.insert(key, value);
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for SessionRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub struct SessionStore {
    backend: Box<dyn SessionBackend>,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// File-backed store in the configured directory
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(FileBackend::new(
            &config.session.config_dir,
            &config.session.storage_key,
        ))
    }

    /// Current record; `None` means logged out. Unreadable records count as absent.
    pub fn get(&self) -> Option<SessionRecord> {
        match self.try_get() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("discarding unreadable session record: {}", e);
                None
            }
        }
    }

    pub fn try_get(&self) -> Result<Option<SessionRecord>, SessionError> {
        match self.backend.load()? {
            Some(raw) => {
                let value: Value = serde_json::from_str(&raw)?;
                match value {
                    Value::Object(map) => Ok(Some(SessionRecord(map))),
                    // a stored `null` reads back as absent
                    Value::Null => Ok(None),
                    other => Err(SessionError::InvalidPatch(kind_of(&other).to_string())),
                }
            }
            None => Ok(None),
        }
    }

    /// Shallow-merge `partial` (a JSON object) into the stored record
    pub fn set(&self, partial: Value) -> Result<(), SessionError> {
        let partial = match partial {
            Value::Object(map) => map,
            other => return Err(SessionError::InvalidPatch(kind_of(&other).to_string())),
        };

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut record = self.get().unwrap_or_default();
        record.merge(partial);
        let raw = serde_json::to_string_pretty(&record)?;
        self.backend.store(&raw)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.backend.remove()?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.get().and_then(|r| r.token().map(str::to_string))
    }

    pub fn user_type(&self) -> Option<String> {
        self.get().and_then(|r| r.user_type().map(str::to_string))
    }

    pub fn highest_user_type(&self) -> Option<String> {
        self.get().and_then(|r| r.highest_user_type().map(str::to_string))
    }

    /// Academics and admins may add courses and projects
    pub fn can_add(&self) -> bool {
        matches!(self.user_type().as_deref(), Some("academic") | Some("admin"))
    }

    pub fn is_admin(&self) -> bool {
        self.user_type().as_deref() == Some("admin")
    }

    pub fn set_user_type(&self, user_type: UserType) -> Result<(), SessionError> {
        self.set(serde_json::json!({ USER_TYPE: user_type.as_str() }))
    }

    /// Shallow-merge `partial` into the cached `profileData` object
    pub fn merge_profile_data(&self, partial: &Value) -> Result<(), SessionError> {
        let mut profile = match self.get().and_then(|r| r.profile_data().cloned()) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        match partial {
            Value::Object(map) => {
                for (key, value) in map {
                    profile.insert(key.clone(), value.clone());
                }
            }
            other => return Err(SessionError::InvalidPatch(kind_of(other).to_string())),
        }
        self.set(serde_json::json!({ PROFILE_DATA: Value::Object(profile) }))
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reading_before_any_write_is_absent() {
        let store = SessionStore::in_memory();
        assert!(store.get().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn set_merges_shallowly() {
        let store = SessionStore::in_memory();
        store.set(json!({"a": 1})).unwrap();
        store.set(json!({"b": 2})).unwrap();
        assert_eq!(store.get().unwrap().into_value(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn last_write_wins_per_key() {
        let store = SessionStore::in_memory();
        store.set(json!({"a": 1})).unwrap();
        store.set(json!({"a": 2})).unwrap();
        assert_eq!(store.get().unwrap().get("a"), Some(&json!(2)));
    }

    #[test]
    fn nested_values_are_replaced_not_merged() {
        let store = SessionStore::in_memory();
        store.set(json!({"profileData": {"zID": "z1234567", "email": "a@b.co"}})).unwrap();
        store.set(json!({"profileData": {"email": "c@d.co"}})).unwrap();
        assert_eq!(store.get().unwrap().profile_data(), Some(&json!({"email": "c@d.co"})));
    }

    #[test]
    fn clear_removes_everything() {
        let store = SessionStore::in_memory();
        store.set(json!({"token": "abc", "userType": "admin"})).unwrap();
        store.clear().unwrap();
        assert!(store.get().is_none());
        // clearing an empty store is fine too
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn rejects_non_object_patch() {
        let store = SessionStore::in_memory();
        assert!(matches!(store.set(json!(3)), Err(SessionError::InvalidPatch(_))));
        assert!(store.get().is_none());
    }

    #[test]
    fn role_helpers() {
        let store = SessionStore::in_memory();
        assert!(!store.can_add());
        store.set(json!({"userType": "academic"})).unwrap();
        assert!(store.can_add());
        assert!(!store.is_admin());
        store.set_user_type(UserType::Admin).unwrap();
        assert!(store.can_add());
        assert!(store.is_admin());
        store.set_user_type(UserType::Student).unwrap();
        assert!(!store.can_add());
    }

    #[test]
    fn merge_profile_data_keeps_existing_fields() {
        let store = SessionStore::in_memory();
        store.set(json!({"profileData": {"zID": "z1234567", "email": "a@b.co"}})).unwrap();
        store.merge_profile_data(&json!({"email": "new@b.co"})).unwrap();
        assert_eq!(
            store.get().unwrap().profile_data(),
            Some(&json!({"zID": "z1234567", "email": "new@b.co"}))
        );
    }

    #[test]
    fn corrupt_record_reads_as_logged_out() {
        let backend = MemoryBackend::new();
        backend.store("{not json").unwrap();
        let store = SessionStore::new(backend);
        assert!(store.get().is_none());
        assert!(store.try_get().is_err());
        // the next write starts from an empty record
        store.set(json!({"token": "t"})).unwrap();
        assert_eq!(store.token().as_deref(), Some("t"));
    }

    #[test]
    fn file_backend_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileBackend::new(dir.path(), SESSION_KEY));
        store.set(json!({"token": "abc"})).unwrap();
        assert!(dir.path().join("userData.json").exists());

        let reopened = SessionStore::new(FileBackend::new(dir.path(), SESSION_KEY));
        assert_eq!(reopened.token().as_deref(), Some("abc"));

        reopened.clear().unwrap();
        assert!(!dir.path().join("userData.json").exists());
        assert!(store.get().is_none());
    }
}
