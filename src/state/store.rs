use super::data::{self, ImageRecord};
use super::storage::KeyValueStore;
use crate::error::StoreError;

/// The GalleryStore owns the ordered record sequence and keeps it in
/// sync with the persistent key-value store.
///
/// The in-memory sequence only changes on a successful load or append,
/// so it always matches the last value written under `key`.
pub struct GalleryStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
    records: Vec<ImageRecord>,
}

impl GalleryStore {
    /// Create the store and hydrate it from storage.
    ///
    /// This start-up load is the only one that falls back to the
    /// placeholder records when nothing usable is saved.
    pub fn open(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = GalleryStore {
            storage,
            key: key.into(),
            records: Vec::new(),
        };

        if !store.load() {
            store.records = data::placeholder_records();
            tracing::info!("🖼️  No saved gallery, showing {} samples", store.records.len());
        }

        store
    }

    /// Re-read the saved sequence.
    ///
    /// Returns whether the saved value replaced the in-memory sequence.
    /// A missing or unparseable value leaves the sequence unchanged.
    pub fn load(&mut self) -> bool {
        let json = match self.storage.get_item(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("⚠️  Could not read '{}' from storage: {}", self.key, e);
                return false;
            }
        };

        match data::records_from_json(&json) {
            Ok(records) => {
                tracing::info!("🖼️  Restored {} images from storage", records.len());
                self.records = records;
                true
            }
            Err(e) => {
                tracing::warn!("⚠️  Ignoring unreadable gallery under '{}': {}", self.key, e);
                false
            }
        }
    }

    /// Append a record and write the full sequence back to storage.
    ///
    /// If the write fails the record is removed again and the error returned.
    pub fn append(&mut self, record: ImageRecord) -> Result<(), StoreError> {
        self.records.push(record);

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = data::records_to_json(&self.records)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Current record sequence, in insertion order
    pub fn all(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Storage key the sequence is saved under
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .finish()
    }
}
