/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the storage layer and the UI layer.
use serde::{Deserialize, Serialize};

/// Image reference used by the built-in sample records
pub const PLACEHOLDER_SRC: &str = "https://via.placeholder.com/400x250";

/// Represents a single image in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Remote URL, local path, or embedded `data:` URL for uploads
    pub src: String,
    /// Display name, also the suggested download filename
    pub title: String,
    /// Free-text label used for filter buttons
    pub category: String,
}

impl ImageRecord {
    pub fn new(src: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            category: category.into(),
        }
    }
}

/// The three records shown when nothing has been saved yet
pub fn placeholder_records() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new(PLACEHOLDER_SRC, "Sample 1", "Game"),
        ImageRecord::new(PLACEHOLDER_SRC, "Sample 2", "Nature"),
        ImageRecord::new(PLACEHOLDER_SRC, "Sample 3", "Sci-Fi"),
    ]
}

/// Convert a record sequence to the JSON array kept in storage
pub fn records_to_json(records: &[ImageRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Parse a record sequence from storage
pub fn records_from_json(json: &str) -> Result<Vec<ImageRecord>, serde_json::Error> {
    serde_json::from_str(json)
}
