use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, image, opaque, row, scrollable, text, text_input, Column, Row,
    Stack,
};
use iced::{Alignment, Color, ContentFit, Element, Length, Task, Theme};
use iced_aw::Wrap;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod gallery;
mod source;
mod state;
mod upload;

use config::GalleryConfig;
use error::ReadError;
use gallery::tree::SelectedFile;
use gallery::{detail, filter, render, ViewTree};
use state::data::ImageRecord;
use state::storage::{KeyValueStore, MemoryStorage, SqliteStorage};
use state::store::GalleryStore;
use upload::{UploadFlow, UploadState};

const CARD_WIDTH: f32 = 240.0;
const CARD_IMAGE_HEIGHT: f32 = 150.0;

/// Display state of one image source
#[derive(Debug, Clone)]
enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

/// Main application state
struct Gallery {
    config: GalleryConfig,
    /// The record sequence and its storage
    store: GalleryStore,
    /// Everything currently drawn on the page
    page: ViewTree,
    upload: UploadFlow,
    /// Decoded images keyed by record `src`
    thumbnails: HashMap<String, Thumbnail>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the category button at this index
    CategoryPressed(usize),
    /// Search box contents changed
    SearchChanged(String),
    /// User clicked the image of the card at this index
    CardPressed(usize),
    CloseDetail,
    Download,
    DownloadComplete(Result<PathBuf, String>),
    ChooseFile,
    FileChosen(Option<PathBuf>),
    TitleChanged(String),
    CategoryChanged(String),
    Upload,
    /// Background file read finished
    FileRead(Result<String, ReadError>),
    /// Background image load finished for this `src`
    ImageLoaded(String, Result<Handle, String>),
}

impl Gallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::load();
        let store = GalleryStore::open(open_storage(&config), config.storage_key.clone());

        let mut page = ViewTree::full();
        render::render_grid(&mut page, store.all());
        render::render_category_buttons(&mut page, store.all());

        tracing::info!(
            "🎨 Image Gallery initialized with {} images (key '{}')",
            store.len(),
            store.key()
        );

        let mut gallery = Gallery {
            config,
            store,
            page,
            upload: UploadFlow::new(),
            thumbnails: HashMap::new(),
        };
        let task = gallery.load_thumbnails();
        (gallery, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CategoryPressed(index) => {
                filter::press_category_button(&mut self.page, index);
                Task::none()
            }
            Message::SearchChanged(query) => {
                if let Some(search) = &mut self.page.search {
                    search.value = query.clone();
                }
                filter::filter_by_search(&mut self.page, &query);
                Task::none()
            }
            Message::CardPressed(index) => {
                let record = self
                    .page
                    .grid
                    .as_ref()
                    .and_then(|grid| grid.cards.get(index))
                    .map(|card| card.record.clone());

                if let Some(record) = record {
                    detail::open(&mut self.page, &record.src, &record.title);
                }
                Task::none()
            }
            Message::CloseDetail => {
                detail::close(&mut self.page);
                Task::none()
            }
            Message::Download => {
                let Some(request) = detail::download_request(&self.page) else {
                    return Task::none();
                };
                Task::perform(
                    detail::download(request, self.config.download_dir()),
                    |result| Message::DownloadComplete(result.map_err(|e| e.to_string())),
                )
            }
            Message::DownloadComplete(result) => {
                match result {
                    Ok(path) => tracing::info!("✅ Download saved to {}", path.display()),
                    Err(e) => tracing::warn!("⚠️  Download failed: {}", e),
                }
                Task::none()
            }
            Message::ChooseFile => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select a JPEG image")
                        .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp"])
                        .pick_file()
                        .await
                        .map(|file| file.path().to_path_buf())
                },
                Message::FileChosen,
            ),
            Message::FileChosen(path) => {
                // Cancelling the dialog keeps the previous selection
                if let (Some(path), Some(input)) = (path, &mut self.page.image_input) {
                    input.selected = Some(SelectedFile::new(path));
                }
                Task::none()
            }
            Message::TitleChanged(value) => {
                if let Some(input) = &mut self.page.title_input {
                    input.value = value;
                }
                Task::none()
            }
            Message::CategoryChanged(value) => {
                if let Some(input) = &mut self.page.category_input {
                    input.value = value;
                }
                Task::none()
            }
            Message::Upload => {
                match self.upload.begin(&mut self.page, &self.config.accepted_type) {
                    Some(file) => Task::perform(upload::read_as_data_url(file), Message::FileRead),
                    None => Task::none(),
                }
            }
            Message::FileRead(result) => {
                match self.upload.complete(&mut self.store, &mut self.page, result) {
                    Ok(()) => self.load_thumbnails(),
                    // Already reported through the status text
                    Err(_) => Task::none(),
                }
            }
            Message::ImageLoaded(src, result) => {
                let thumbnail = match result {
                    Ok(handle) => Thumbnail::Ready(handle),
                    Err(e) => {
                        tracing::warn!("⚠️  Could not load image {}: {}", abbreviate(&src), e);
                        Thumbnail::Failed
                    }
                };
                self.thumbnails.insert(src, thumbnail);
                Task::none()
            }
        }
    }

    /// Start loading every rendered image that has not been requested yet
    fn load_thumbnails(&mut self) -> Task<Message> {
        let Some(grid) = &self.page.grid else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for card in &grid.cards {
            let src = card.record.src.clone();
            if self.thumbnails.contains_key(&src) {
                continue;
            }
            self.thumbnails.insert(src.clone(), Thumbnail::Loading);
            tasks.push(Task::perform(load_image(src.clone()), move |result| {
                Message::ImageLoaded(src.clone(), result)
            }));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let heading = match &self.page.grid {
            Some(grid) if !self.store.is_empty() => format!(
                "Image Gallery ({} of {})",
                grid.visible_records().count(),
                self.store.len()
            ),
            _ => "Image Gallery".to_string(),
        };

        let search = self.page.search.as_ref().map(|search| {
            text_input("Search by title or category...", &search.value)
                .on_input(Message::SearchChanged)
                .padding(10)
        });

        let categories = self.page.category_bar.as_ref().map(|bar| {
            row(bar.buttons.iter().enumerate().map(|(index, b)| {
                let style: fn(&Theme, button::Status) -> button::Style = if b.active {
                    button::primary
                } else {
                    button::secondary
                };
                button(text(b.category.as_str()))
                    .style(style)
                    .on_press(Message::CategoryPressed(index))
                    .into()
            }))
            .spacing(8)
        });

        let grid = self.page.grid.as_ref().map(|grid| {
            let cards: Vec<Element<Message>> = grid
                .cards
                .iter()
                .enumerate()
                .filter(|(_, card)| card.visible)
                .map(|(index, card)| self.card(index, &card.record))
                .collect();
            scrollable(Wrap::with_elements(cards)).height(Length::Fill)
        });

        let content = Column::new()
            .push(text(heading).size(36))
            .push_maybe(search)
            .push_maybe(categories)
            .push_maybe(grid)
            .push(self.upload_form())
            .spacing(16)
            .padding(24);

        let base: Element<Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        match self.detail_view() {
            Some(overlay) => Stack::with_children(vec![base, overlay]).into(),
            None => base,
        }
    }

    fn card<'a>(&'a self, index: usize, record: &'a ImageRecord) -> Element<'a, Message> {
        let picture: Element<Message> = match self.thumbnails.get(&record.src) {
            Some(Thumbnail::Ready(handle)) => image(handle.clone())
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(CARD_IMAGE_HEIGHT))
                .content_fit(ContentFit::Cover)
                .into(),
            Some(Thumbnail::Failed) => image_placeholder("Image unavailable"),
            _ => image_placeholder("Loading..."),
        };

        let body = column![
            button(picture)
                .padding(0)
                .style(button::text)
                .on_press(Message::CardPressed(index)),
            text(&record.title).size(18),
            text(format!("Category: {}", record.category)).size(14),
        ]
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH));

        container(body)
            .padding(10)
            .style(container::rounded_box)
            .into()
    }

    fn upload_form(&self) -> Element<Message> {
        let file_input = self.page.image_input.as_ref().map(|input| {
            let label = input
                .selected
                .as_ref()
                .map(SelectedFile::file_name)
                .unwrap_or_else(|| "No file chosen".to_string());
            row![
                button("Choose File").on_press(Message::ChooseFile),
                text(label),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
        });

        let title = self.page.title_input.as_ref().map(|input| {
            text_input("Title", &input.value)
                .on_input(Message::TitleChanged)
                .padding(8)
                .width(Length::Fixed(200.0))
        });

        let category = self.page.category_input.as_ref().map(|input| {
            text_input("Category", &input.value)
                .on_input(Message::CategoryChanged)
                .padding(8)
                .width(Length::Fixed(200.0))
        });

        let idle = self.upload.state() == UploadState::Idle;
        let form = Row::new()
            .push_maybe(file_input)
            .push_maybe(title)
            .push_maybe(category)
            .push(button("Upload").on_press_maybe(idle.then_some(Message::Upload)))
            .spacing(12)
            .align_y(Alignment::Center);

        Column::new()
            .push(form)
            .push_maybe(self.page.status_text().map(|status| text(status).size(16)))
            .spacing(8)
            .into()
    }

    fn detail_view(&self) -> Option<Element<Message>> {
        let detail = self.page.detail.as_ref().filter(|d| d.visible)?;

        let picture: Element<Message> = match self.thumbnails.get(&detail.src) {
            Some(Thumbnail::Ready(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            _ => text("Image unavailable").into(),
        };

        let content = column![
            text(&detail.title).size(28),
            container(picture)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            row![
                button("Download").on_press(Message::Download),
                button("Close").on_press(Message::CloseDetail),
            ]
            .spacing(10),
        ]
        .spacing(16)
        .padding(24)
        .align_x(Alignment::Center);

        Some(opaque(
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| {
                    container::Style::default().background(Color::from_rgba(0.0, 0.0, 0.0, 0.85))
                }),
        ))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn image_placeholder(label: &str) -> Element<'_, Message> {
    container(text(label).size(14))
        .center_x(Length::Fixed(CARD_WIDTH))
        .center_y(Length::Fixed(CARD_IMAGE_HEIGHT))
        .style(container::rounded_box)
        .into()
}

/// Open the SQLite store, or keep the gallery in memory if that fails
fn open_storage(config: &GalleryConfig) -> Box<dyn KeyValueStore> {
    let Some(path) = config.database_path() else {
        tracing::warn!("⚠️  No data directory found, uploads will not survive a restart");
        return Box::new(MemoryStorage::new());
    };

    match SqliteStorage::open(&path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!("⚠️  {}; uploads will not survive a restart", e);
            Box::new(MemoryStorage::new())
        }
    }
}

/// Resolve an image source into something iced can draw
async fn load_image(src: String) -> Result<Handle, String> {
    source::fetch_bytes(src)
        .await
        .map(Handle::from_bytes)
        .map_err(|e| e.to_string())
}

/// Data URLs are far too long for a log line
fn abbreviate(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((end, _)) => &src[..end],
        None => src,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("Image Gallery", Gallery::update, Gallery::view)
        .theme(Gallery::theme)
        .centered()
        .run_with(Gallery::new)
}
