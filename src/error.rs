/// Error types for the gallery
///
/// Nothing in here is fatal. Every error ends up either as a status
/// message in the upload form or as a log line.
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the persistent key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("could not create storage directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures while writing the gallery back to storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not serialize gallery: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Upload form problems, reported through the status text
///
/// The display strings are exactly what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a JPEG file.")]
    MissingFile,

    #[error("Please enter both a title and category.")]
    MissingFields,

    #[error("Only JPEG images are allowed.")]
    UnsupportedType(String),
}

/// The selected file could not be turned into a data URL
///
/// Carried inside a UI message, so the cause is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not read {}: {reason}", path.display())]
pub struct ReadError {
    pub path: PathBuf,
    pub reason: String,
}

/// Why an upload did not produce a new record
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no upload is waiting for its file")]
    NotReading,

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An image source could not be resolved to bytes
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed data URL")]
    MalformedDataUrl,

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A download could not be saved
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no download directory available")]
    NoDownloadDir,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The config file exists but could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_status_text() {
        assert_eq!(ValidationError::MissingFile.to_string(), "Please select a JPEG file.");
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please enter both a title and category."
        );
        assert_eq!(
            ValidationError::UnsupportedType("image/png".into()).to_string(),
            "Only JPEG images are allowed."
        );
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = ReadError {
            path: PathBuf::from("/tmp/cat.jpg"),
            reason: "permission denied".into(),
        };
        assert_eq!(err.to_string(), "could not read /tmp/cat.jpg: permission denied");
    }
}
