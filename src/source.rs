/// Image source resolution
///
/// A record's `src` is one of:
/// - an embedded `data:<mime>;base64,<payload>` URL (uploads)
/// - a remote `http(s)://` URL (the built-in samples)
/// - a local file path
use base64::Engine;
use std::path::PathBuf;

use crate::error::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Embedded { mime: String, payload: String },
    Remote(String),
    Local(PathBuf),
}

impl ImageSource {
    /// Classify a record `src`
    pub fn parse(src: &str) -> Result<Self, SourceError> {
        if let Some(rest) = src.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or(SourceError::MalformedDataUrl)?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or(SourceError::MalformedDataUrl)?;
            return Ok(ImageSource::Embedded {
                mime: mime.to_string(),
                payload: payload.to_string(),
            });
        }

        if src.starts_with("http://") || src.starts_with("https://") {
            return Ok(ImageSource::Remote(src.to_string()));
        }

        Ok(ImageSource::Local(PathBuf::from(src)))
    }
}

/// Build an embedded data URL from raw bytes
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Resolve a record `src` to the image bytes
pub async fn fetch_bytes(src: String) -> Result<Vec<u8>, SourceError> {
    match ImageSource::parse(&src)? {
        ImageSource::Embedded { payload, .. } => {
            Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
        }
        ImageSource::Remote(url) => {
            let response = reqwest::get(&url).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
        ImageSource::Local(path) => tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedded() {
        let source = ImageSource::parse("data:image/jpeg;base64,/9j/").unwrap();
        assert_eq!(
            source,
            ImageSource::Embedded {
                mime: "image/jpeg".into(),
                payload: "/9j/".into()
            }
        );
    }

    #[test]
    fn test_parse_remote_and_local() {
        assert_eq!(
            ImageSource::parse("https://via.placeholder.com/400x250").unwrap(),
            ImageSource::Remote("https://via.placeholder.com/400x250".into())
        );
        assert_eq!(
            ImageSource::parse("/home/me/cat.jpg").unwrap(),
            ImageSource::Local(PathBuf::from("/home/me/cat.jpg"))
        );
    }

    #[test]
    fn test_non_base64_data_url_is_rejected() {
        assert!(matches!(
            ImageSource::parse("data:text/plain,hello"),
            Err(SourceError::MalformedDataUrl)
        ));
        assert!(matches!(
            ImageSource::parse("data:image/jpeg;base64"),
            Err(SourceError::MalformedDataUrl)
        ));
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/jpeg", b"hi"), "data:image/jpeg;base64,aGk=");
        assert_eq!(to_data_url("", b"hi"), "data:application/octet-stream;base64,aGk=");
    }

    #[tokio::test]
    async fn test_fetch_embedded() {
        let bytes = fetch_bytes(to_data_url("image/jpeg", &[1, 2, 3])).await.unwrap();
        assert_eq!(bytes, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.jpg");
        std::fs::write(&path, [9u8, 8, 7]).unwrap();

        let bytes = fetch_bytes(path.to_string_lossy().to_string()).await.unwrap();
        assert_eq!(bytes, [9, 8, 7]);
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file() {
        let result = fetch_bytes("/nonexistent/path.jpg".to_string()).await;
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }

    #[tokio::test]
    async fn test_fetch_bad_base64() {
        let result = fetch_bytes("data:image/jpeg;base64,***".to_string()).await;
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }
}
