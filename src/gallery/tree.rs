/// The addressable elements of the gallery page
///
/// Every element is optional. The renderer, filters, detail view and
/// upload flow all look their element up here and do nothing when it is
/// missing, so one absent element only disables its own feature.
use std::path::PathBuf;

use crate::state::data::ImageRecord;

/// Fixed identifiers of the page elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    GalleryGrid,
    CategoryButtons,
    Search,
    ImageInput,
    ImageTitle,
    ImageCategory,
    UploadStatus,
    ImageModal,
}

impl ElementId {
    pub const ALL: [ElementId; 8] = [
        ElementId::GalleryGrid,
        ElementId::CategoryButtons,
        ElementId::Search,
        ElementId::ImageInput,
        ElementId::ImageTitle,
        ElementId::ImageCategory,
        ElementId::UploadStatus,
        ElementId::ImageModal,
    ];
}

/// One rendered card. The record travels with the card so filters
/// never need to read anything back from the rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub record: ImageRecord,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryGrid {
    pub cards: Vec<Card>,
}

impl GalleryGrid {
    /// Records of the cards currently shown
    pub fn visible_records(&self) -> impl Iterator<Item = &ImageRecord> {
        self.cards.iter().filter(|c| c.visible).map(|c| &c.record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryButton {
    pub category: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBar {
    pub buttons: Vec<CategoryButton>,
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Type reported for the file, derived from its name only.
    /// Empty when the extension is unknown.
    pub declared_type: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declared_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or_default()
            .to_string();
        Self { path, declared_type }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInput {
    pub selected: Option<SelectedFile>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusText {
    pub text: String,
}

/// What the download action of an open detail view saves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub src: String,
    pub file_name: String,
}

/// The lightbox overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailView {
    pub visible: bool,
    pub src: String,
    pub title: String,
    pub download: Option<DownloadRequest>,
}

/// All page elements the gallery reads and writes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewTree {
    pub grid: Option<GalleryGrid>,
    pub category_bar: Option<CategoryBar>,
    pub search: Option<TextInput>,
    pub image_input: Option<FileInput>,
    pub title_input: Option<TextInput>,
    pub category_input: Option<TextInput>,
    pub status: Option<StatusText>,
    pub detail: Option<DetailView>,
}

impl ViewTree {
    /// A page with every element present
    pub fn full() -> Self {
        Self::with_elements(&ElementId::ALL)
    }

    /// A page containing only the given elements, all empty
    pub fn with_elements(ids: &[ElementId]) -> Self {
        let mut tree = ViewTree::default();
        for id in ids {
            match id {
                ElementId::GalleryGrid => tree.grid = Some(GalleryGrid::default()),
                ElementId::CategoryButtons => tree.category_bar = Some(CategoryBar::default()),
                ElementId::Search => tree.search = Some(TextInput::default()),
                ElementId::ImageInput => tree.image_input = Some(FileInput::default()),
                ElementId::ImageTitle => tree.title_input = Some(TextInput::default()),
                ElementId::ImageCategory => tree.category_input = Some(TextInput::default()),
                ElementId::UploadStatus => tree.status = Some(StatusText::default()),
                ElementId::ImageModal => tree.detail = Some(DetailView::default()),
            }
        }
        tree
    }

    pub fn has(&self, id: ElementId) -> bool {
        match id {
            ElementId::GalleryGrid => self.grid.is_some(),
            ElementId::CategoryButtons => self.category_bar.is_some(),
            ElementId::Search => self.search.is_some(),
            ElementId::ImageInput => self.image_input.is_some(),
            ElementId::ImageTitle => self.title_input.is_some(),
            ElementId::ImageCategory => self.category_input.is_some(),
            ElementId::UploadStatus => self.status.is_some(),
            ElementId::ImageModal => self.detail.is_some(),
        }
    }

    /// Set the upload status text, if the status element exists
    pub fn set_status(&mut self, text: impl Into<String>) {
        if let Some(status) = &mut self.status {
            status.text = text.into();
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tree_has_everything() {
        let tree = ViewTree::full();
        assert!(ElementId::ALL.iter().all(|id| tree.has(*id)));
    }

    #[test]
    fn test_partial_tree() {
        let tree = ViewTree::with_elements(&[ElementId::GalleryGrid, ElementId::Search]);
        assert!(tree.has(ElementId::GalleryGrid));
        assert!(tree.has(ElementId::Search));
        assert!(!tree.has(ElementId::ImageModal));
        assert!(!tree.has(ElementId::UploadStatus));
    }

    #[test]
    fn test_status_without_element_is_dropped() {
        let mut tree = ViewTree::default();
        tree.set_status("hello");
        assert_eq!(tree.status_text(), None);

        let mut tree = ViewTree::with_elements(&[ElementId::UploadStatus]);
        tree.set_status("hello");
        assert_eq!(tree.status_text(), Some("hello"));
    }

    #[test]
    fn test_declared_type_comes_from_the_name() {
        assert_eq!(SelectedFile::new("/tmp/cat.jpg").declared_type, "image/jpeg");
        assert_eq!(SelectedFile::new("/tmp/cat.JPEG").declared_type, "image/jpeg");
        assert_eq!(SelectedFile::new("/tmp/cat.png").declared_type, "image/png");
        assert_eq!(SelectedFile::new("/tmp/cat").declared_type, "");
        assert_eq!(SelectedFile::new("/tmp/cat.jpg").file_name(), "cat.jpg");
    }
}
