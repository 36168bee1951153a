use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Named-slot key-value storage.
///
/// Each slot holds one opaque string value and is replaced wholesale on
/// write; there is no append or partial update.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Read the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A slot that was
    /// never written is `Ok(None)`, not an error.
    async fn read_slot(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn write_slot(&self, name: &str, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotRepository for InMemoryRepository {
    async fn read_slot(&self, name: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).cloned())
    }

    async fn write_slot(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Storage handles behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn SlotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let slots: Arc<dyn SlotRepository> = Arc::new(InMemoryRepository::new());
        Self { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unwritten_slot_reads_as_none() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.read_slot("progress").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_replaces_previous_value() {
        let repo = InMemoryRepository::new();
        repo.write_slot("progress", "{}").await.unwrap();
        repo.write_slot("progress", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            repo.read_slot("progress").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[tokio::test]
    async fn clones_share_the_same_slots() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        storage.slots.write_slot("k", "v").await.unwrap();
        assert_eq!(other.slots.read_slot("k").await.unwrap().as_deref(), Some("v"));
    }
}
