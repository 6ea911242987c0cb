//! Durable cart storage port.

use maison_commerce::cart::PersistedCart;
use std::sync::{Arc, Mutex};

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backend read/write failure.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Failed to serialize or deserialize the persisted cart.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for one session's cart.
///
/// Implementations are synchronous; the store treats writes as
/// fire-and-forget and never blocks reads on them.
pub trait CartStorage: Send + Sync {
    /// Load the persisted cart, if one was saved.
    fn load(&self) -> Result<Option<PersistedCart>, StorageError>;

    /// Save the persisted cart, replacing any previous value.
    fn save(&self, cart: &PersistedCart) -> Result<(), StorageError>;

    /// Remove the persisted cart.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Stores the serialized JSON bytes rather than the value itself, so the
/// round trip through the persisted layout is exercised exactly as a real
/// backend would. Clones share the same slot, which makes it easy to hand
/// one "disk" to successive sessions in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create an empty storage slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedCart>, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match slot.as_deref() {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(cart)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        *slot = Some(bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
