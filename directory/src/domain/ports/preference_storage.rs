//! Port for durable key/value preference storage.
//!
//! Values are opaque strings; encoding and decoding belong to the preference
//! types in [`crate::domain::preferences`]. Reads of a key that was never
//! written return `Ok(None)`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::define_port_error;

define_port_error! {
    /// Errors raised by preference storage adapters.
    pub enum PreferenceStorageError {
        /// Stored value could not be read.
        Read { key: String, message: String } =>
            "failed to read preference {key}: {message}",
        /// Value could not be written.
        Write { key: String, message: String } =>
            "failed to write preference {key}: {message}",
        /// Key cannot be mapped onto the storage medium.
        InvalidKey { key: String } => "invalid preference key {key:?}",
    }
}

/// Durable storage for raw preference values.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceStorageError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceStorageError>;
}

impl<T: PreferenceStorage + ?Sized> PreferenceStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceStorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceStorageError> {
        (**self).write(key, value)
    }
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStorage {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferenceStorage {
    /// Storage pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl PreferenceStorage for InMemoryPreferenceStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceStorageError> {
        let values = self
            .values
            .read()
            .map_err(|_| PreferenceStorageError::read(key, "storage lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceStorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| PreferenceStorageError::write(key, "storage lock poisoned"))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! In-memory adapter behaviour.

    use super::*;

    #[test]
    fn missing_keys_read_as_none() {
        let storage = InMemoryPreferenceStorage::default();

        assert_eq!(storage.read("app-theme"), Ok(None));
    }

    #[test]
    fn writes_replace_previous_values() {
        let storage = InMemoryPreferenceStorage::with_entries([("app-theme", "light")]);

        storage.write("app-theme", "dark").expect("write succeeds");

        assert_eq!(storage.read("app-theme"), Ok(Some("dark".to_owned())));
    }

    #[test]
    fn shared_handles_see_the_same_values() {
        let storage = Arc::new(InMemoryPreferenceStorage::default());
        let other = Arc::clone(&storage);

        storage.write("user-favorites", "[1]").expect("write succeeds");

        assert_eq!(other.read("user-favorites"), Ok(Some("[1]".to_owned())));
    }

    #[test]
    fn error_messages_name_the_key() {
        let error = PreferenceStorageError::write("app-theme", "disk full");
        assert_eq!(
            error.to_string(),
            "failed to write preference app-theme: disk full"
        );
    }
}
