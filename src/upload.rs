/// Upload flow
///
/// Idle -> Validating -> ReadingFile -> Committing -> Idle
///
/// Validation happens synchronously on the form in the page. The file
/// read is the only asynchronous step: `begin` hands back the file to
/// read, the caller runs `read_as_data_url` in the background and feeds
/// the outcome into `complete`.
use crate::error::{ReadError, UploadError, ValidationError};
use crate::gallery::render::{render_category_buttons, render_grid};
use crate::gallery::tree::{SelectedFile, ViewTree};
use crate::source;
use crate::state::data::ImageRecord;
use crate::state::store::GalleryStore;

/// Status text shown after a committed upload
pub const SUCCESS_MESSAGE: &str = "Upload successful!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Validating,
    ReadingFile,
    Committing,
}

/// A validated upload waiting for its file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub title: String,
    pub category: String,
}

/// Check the upload form.
///
/// The type check compares the declared type string only; the file
/// contents are never inspected.
pub fn validate(tree: &ViewTree, accepted_type: &str) -> Result<UploadRequest, ValidationError> {
    let file = tree
        .image_input
        .as_ref()
        .and_then(|input| input.selected.clone())
        .ok_or(ValidationError::MissingFile)?;

    let title = trimmed(tree.title_input.as_ref().map(|i| i.value.as_str()));
    let category = trimmed(tree.category_input.as_ref().map(|i| i.value.as_str()));
    if title.is_empty() || category.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if file.declared_type != accepted_type {
        return Err(ValidationError::UnsupportedType(file.declared_type));
    }

    Ok(UploadRequest {
        file,
        title,
        category,
    })
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

/// Read the file into an embedded data URL using its declared type
pub async fn read_as_data_url(file: SelectedFile) -> Result<String, ReadError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|e| ReadError {
        path: file.path.clone(),
        reason: e.to_string(),
    })?;
    Ok(source::to_data_url(&file.declared_type, &bytes))
}

#[derive(Debug, Default)]
pub struct UploadFlow {
    state: UploadState,
    pending: Option<UploadRequest>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Validate the form and start reading the file.
    ///
    /// Returns the file to read, or `None` when validation failed (the
    /// reason is in the status text) or an upload is already running.
    pub fn begin(&mut self, tree: &mut ViewTree, accepted_type: &str) -> Option<SelectedFile> {
        if self.state != UploadState::Idle {
            tracing::debug!("Upload already in progress ({:?})", self.state);
            return None;
        }

        self.state = UploadState::Validating;
        match validate(tree, accepted_type) {
            Ok(request) => {
                let file = request.file.clone();
                tracing::info!("📤 Reading {} for upload", file.path.display());
                self.pending = Some(request);
                self.state = UploadState::ReadingFile;
                Some(file)
            }
            Err(e) => {
                tree.set_status(e.to_string());
                self.state = UploadState::Idle;
                None
            }
        }
    }

    /// Commit the upload once the file read has finished.
    ///
    /// On success the record is appended and saved, the grid and category
    /// buttons are redrawn if the page has a grid, and the form is cleared.
    pub fn complete(
        &mut self,
        store: &mut GalleryStore,
        tree: &mut ViewTree,
        read: Result<String, ReadError>,
    ) -> Result<(), UploadError> {
        let Some(request) = self.pending.take() else {
            return Err(UploadError::NotReading);
        };

        let data_url = match read {
            Ok(data_url) => data_url,
            Err(e) => {
                tracing::warn!("⚠️  Upload read failed: {}", e);
                tree.set_status(format!("Could not read the selected file: {}", e.reason));
                self.state = UploadState::Idle;
                return Err(e.into());
            }
        };

        self.state = UploadState::Committing;
        let record = ImageRecord::new(data_url, request.title, request.category);
        let result = store.append(record);
        self.state = UploadState::Idle;

        if let Err(e) = result {
            tracing::warn!("⚠️  Upload could not be saved: {}", e);
            tree.set_status(format!("Upload failed: {}", e));
            return Err(e.into());
        }

        if tree.grid.is_some() {
            render_grid(tree, store.all());
            render_category_buttons(tree, store.all());
        }

        if let Some(input) = &mut tree.image_input {
            input.selected = None;
        }
        if let Some(input) = &mut tree.title_input {
            input.value.clear();
        }
        if let Some(input) = &mut tree.category_input {
            input.value.clear();
        }
        tree.set_status(SUCCESS_MESSAGE);

        tracing::info!("✅ Upload committed, {} images in gallery", store.len());
        Ok(())
    }
}
