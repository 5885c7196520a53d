//! Key-value storage port used by the session, cart and feedback stores.
//!
//! The app keeps its small amount of state (signed-in user, cart, orders,
//! feedback) as JSON strings under fixed keys. Platform storage implements
//! [`KeyValueStore`]; [`MemoryStore`] backs tests and the command line.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Stored value under {key:?} is not valid JSON: {source}")]
    Decode {
        key:    String,
        source: serde_json::Error,
    },

    #[error("Failed to encode value for {key:?}: {source}")]
    Encode {
        key:    String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] Error),
}

/// Minimal string key-value capability.
pub trait KeyValueStore {
    /// # Errors
    /// Returns `StoreError::Backend` when the underlying storage fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Returns `StoreError::Backend` when the underlying storage fails.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError::Backend` when the underlying storage fails.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Reads and decodes the JSON value under `key`.
///
/// # Errors
/// Returns `StoreError::Decode` when the stored text is not a valid `T`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_owned(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
/// Returns `StoreError::Encode` if serialization fails.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, raw)
}

/// Like [`load_json`], but an undecodable value is logged and treated as absent.
///
/// # Errors
/// Only backend failures are returned.
pub fn load_json_lenient<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match load_json(store, key) {
        Err(StoreError::Decode { key, source }) => {
            tracing::warn!(%key, error = %source, "discarding undecodable stored value");
            Ok(None)
        }
        other => other,
    }
}
