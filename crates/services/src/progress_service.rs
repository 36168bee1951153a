use std::sync::Arc;

use prep_core::mastery::{Judgment, MasteryRecord, ProgressMap};
use storage::repository::SlotRepository;
use tokio::sync::Mutex;

use crate::error::ProgressError;

/// Storage slot holding the serialized progress map.
pub const PROGRESS_SLOT: &str = "aws-practitioner-progress";

/// Owns the learner's mastery records and keeps the storage slot in step.
///
/// After `open`, the in-memory map is authoritative. Every mutation rewrites
/// the whole slot; a failed write is logged and the update stays in memory.
pub struct ProgressStore {
    slots: Arc<dyn SlotRepository>,
    slot_name: String,
    cache: Mutex<ProgressMap>,
}

impl ProgressStore {
    /// Open the store on the default progress slot and load what it holds.
    pub async fn open(slots: Arc<dyn SlotRepository>) -> Self {
        Self::open_slot(slots, PROGRESS_SLOT).await
    }

    /// Open the store on a named slot.
    pub async fn open_slot(slots: Arc<dyn SlotRepository>, slot_name: impl Into<String>) -> Self {
        let slot_name = slot_name.into();
        let initial = read_map(slots.as_ref(), &slot_name).await;
        Self {
            slots,
            slot_name,
            cache: Mutex::new(initial),
        }
    }

    #[must_use]
    pub fn slot_name(&self) -> &str {
        &self.slot_name
    }

    /// Re-read the persisted slot and replace the in-memory map with it.
    ///
    /// Missing, unreadable, or corrupt data yields an empty map.
    pub async fn load_all(&self) -> ProgressMap {
        let mut cache = self.cache.lock().await;
        *cache = read_map(self.slots.as_ref(), &self.slot_name).await;
        cache.clone()
    }

    /// Current in-memory map, without touching storage.
    pub async fn snapshot(&self) -> ProgressMap {
        self.cache.lock().await.clone()
    }

    pub async fn get(&self, key: &str) -> Option<MasteryRecord> {
        self.cache.lock().await.get(key).copied()
    }

    /// Apply a judgment to the card keyed by `key` and persist the map.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Mastery` for an empty key; nothing is written.
    pub async fn record_judgment(
        &self,
        key: &str,
        judgment: Judgment,
    ) -> Result<ProgressMap, ProgressError> {
        let mut cache = self.cache.lock().await;
        let record = cache.record(key, judgment)?;
        tracing::debug!(
            key,
            ?judgment,
            correct_count = record.correct_count,
            mastered = record.mastered,
            encounters = record.encounters,
            "recorded judgment"
        );
        self.persist(&cache).await;
        Ok(cache.clone())
    }

    /// Clear the mastered flag of `key`, leaving its counters untouched.
    ///
    /// An unknown key changes nothing and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Mastery` for an empty key.
    pub async fn reset_mastery(&self, key: &str) -> Result<ProgressMap, ProgressError> {
        let mut cache = self.cache.lock().await;
        if cache.reset_mastery(key)?.is_some() {
            tracing::debug!(key, "cleared mastered flag");
            self.persist(&cache).await;
        }
        Ok(cache.clone())
    }

    /// Drop every record and persist the empty map.
    pub async fn clear_all(&self) -> ProgressMap {
        let mut cache = self.cache.lock().await;
        *cache = ProgressMap::new();
        tracing::info!(slot = %self.slot_name, "cleared all progress");
        self.persist(&cache).await;
        cache.clone()
    }

    async fn persist(&self, map: &ProgressMap) {
        let json = match serde_json::to_string(map) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(slot = %self.slot_name, error = %err, "failed to serialize progress");
                return;
            }
        };
        if let Err(err) = self.slots.write_slot(&self.slot_name, &json).await {
            tracing::error!(slot = %self.slot_name, error = %err, "failed to persist progress");
        }
    }
}

async fn read_map(slots: &dyn SlotRepository, slot_name: &str) -> ProgressMap {
    let raw = match slots.read_slot(slot_name).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return ProgressMap::new(),
        Err(err) => {
            tracing::error!(slot = slot_name, error = %err, "failed to read progress");
            return ProgressMap::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(slot = slot_name, error = %err, "discarding unreadable progress");
        ProgressMap::new()
    })
}
