// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for cham tools.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Key is empty or contains characters other than ASCII alphanumerics,
    /// `-` and `_`.
    #[error("invalid config key {0:?}")]
    InvalidKey(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Rejects keys a store could not map to a single flat file name.
///
/// # Errors
/// [`ConfigError::InvalidKey`] for an empty key or one with path separators,
/// dots or other punctuation.
pub fn check_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value under `key`. `Ok(None)` if missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        check_key(key)?;
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`ConfigService::load`], falling back to `T::default()` when missing.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Serialize and persist `value` under `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        check_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Map-backed store; `broken` makes every load fail with an I/O error.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) data: RefCell<HashMap<String, Vec<u8>>>,
        pub(crate) broken: bool,
    }

    impl ConfigStore for MemoryStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            if self.broken {
                return Err(std::io::Error::other("disk on fire").into());
            }
            self.data
                .borrow()
                .get(key)
                .cloned()
                .ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.data.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn missing_key_loads_as_none() {
        let service = ConfigService::new(MemoryStore::default());
        assert!(service.load::<u32>("absent").unwrap().is_none());
        assert_eq!(service.load_or_default::<u32>("absent").unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let service = ConfigService::new(MemoryStore::default());
        service.save("numbers", &vec![1, 2, 3]).unwrap();
        assert_eq!(
            service.load::<Vec<i32>>("numbers").unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn empty_blob_is_missing() {
        let store = MemoryStore::default();
        store.save_raw("blank", b"").unwrap();
        let service = ConfigService::new(store);
        assert!(service.load::<u32>("blank").unwrap().is_none());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let store = MemoryStore::default();
        store.save_raw("bad", b"{ nope").unwrap();
        let service = ConfigService::new(store);
        assert!(matches!(
            service.load::<u32>("bad"),
            Err(ConfigError::Serde(_))
        ));
    }

    #[test]
    fn keys_must_be_flat_names() {
        let service = ConfigService::new(MemoryStore::default());
        for key in ["", "../escape", "nested/prefs", "cham.bak", "with space"] {
            assert!(
                matches!(service.save(key, &1u32), Err(ConfigError::InvalidKey(_))),
                "{key:?}"
            );
            assert!(
                matches!(service.load::<u32>(key), Err(ConfigError::InvalidKey(_))),
                "{key:?}"
            );
        }
        assert!(service.store().data.borrow().is_empty());
        service.save("cham-cli_2", &1u32).unwrap();
    }

    #[test]
    fn store_errors_propagate() {
        let service = ConfigService::new(MemoryStore {
            broken: true,
            ..MemoryStore::default()
        });
        assert!(matches!(service.load::<u32>("any"), Err(ConfigError::Io(_))));
    }
}
