/// Lightbox detail view and its download action
use std::path::{Path, PathBuf};

use super::tree::{DownloadRequest, ViewTree};
use crate::error::DownloadError;
use crate::source;

/// Show `src` in the detail view and bind its download action.
///
/// The suggested file name is always `<title>.jpg`, whatever the
/// image's real encoding is.
pub fn open(tree: &mut ViewTree, src: &str, title: &str) {
    let Some(detail) = &mut tree.detail else {
        return;
    };

    detail.visible = true;
    detail.src = src.to_string();
    detail.title = title.to_string();
    detail.download = Some(DownloadRequest {
        src: src.to_string(),
        file_name: format!("{}.jpg", title),
    });
}

/// Hide the detail view
pub fn close(tree: &mut ViewTree) {
    if let Some(detail) = &mut tree.detail {
        detail.visible = false;
    }
}

/// The download bound to the open detail view, if any
pub fn download_request(tree: &ViewTree) -> Option<DownloadRequest> {
    tree.detail
        .as_ref()
        .filter(|d| d.visible)
        .and_then(|d| d.download.clone())
}

/// Save the image behind `request` into `dir`.
/// Returns the path that was written.
pub async fn download(request: DownloadRequest, dir: Option<PathBuf>) -> Result<PathBuf, DownloadError> {
    let dir = dir.ok_or(DownloadError::NoDownloadDir)?;
    let bytes = source::fetch_bytes(request.src).await?;

    let path = target_path(&dir, &request.file_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| DownloadError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!("💾 Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Titles are free text; keep them from escaping the download directory
fn target_path(dir: &Path, file_name: &str) -> PathBuf {
    let name: String = file_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    dir.join(name)
}
