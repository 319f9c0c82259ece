use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{column, container, row, text};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;

mod api;
mod config;
mod state;
mod storage;
mod ui;

use api::ApiClient;
use config::Config;
use state::data::{ImageRecord, SearchRequest};
use state::forms::{TextQueryForm, UploadForm, UrlSearchForm};
use state::gallery::{FetchPlan, GalleryState, ResultCoordinator};
use storage::StorageRefResolver;
use ui::gallery::Thumbnail;

/// Main application state
struct PixSeek {
    /// Client for the remote search API
    api: ApiClient,
    /// Turns storage references into fetchable URLs
    resolver: StorageRefResolver,
    /// Owns the gallery; the single writer of its state
    coordinator: ResultCoordinator,
    /// Free-text search form
    text_form: TextQueryForm,
    /// Image-URL search form
    url_form: UrlSearchForm,
    /// Upload form
    upload_form: UploadForm,
    /// Per-card image state for the current result set, keyed by record id
    thumbnails: HashMap<String, Thumbnail>,
    /// Shared placeholder for broken or still-loading card images
    placeholder: Handle,
    /// One-shot notification line (upload results, etc.)
    status: String,
    /// An upload is in flight; the submit button is disabled meanwhile
    uploading: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Text search box edited
    SearchInputChanged(String),
    /// Text search submitted (enter or button)
    SearchSubmitted,
    /// URL search box edited
    UrlInputChanged(String),
    /// URL search submitted
    UrlSearchSubmitted,
    /// Upload form fields edited
    UploadTitleChanged(String),
    UploadDescriptionChanged(String),
    UploadTagsChanged(String),
    /// User clicked "Choose File"
    UploadFilePick,
    /// Upload submitted
    UploadSubmitted,
    /// Background upload finished
    UploadFinished(Result<(), String>),
    /// A coordinator-owned fetch finished (text search, list-all, or the
    /// URL-search side channel)
    FetchFinished {
        seq: u64,
        outcome: Result<Vec<ImageRecord>, String>,
    },
    /// One card's image bytes arrived (or didn't)
    ThumbnailFetched {
        id: String,
        outcome: Result<Vec<u8>, String>,
    },
}

impl PixSeek {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        println!("🔎 pixseek starting against {}", config.api_base_url);

        let mut coordinator = ResultCoordinator::new();
        // Idle never just sits there: the default browse view loads
        // immediately
        let startup = coordinator.browse();

        let app = PixSeek {
            api: ApiClient::new(config.api_base_url),
            resolver: StorageRefResolver::new(config.storage_domain),
            coordinator,
            text_form: TextQueryForm::default(),
            url_form: UrlSearchForm::default(),
            upload_form: UploadForm::default(),
            thumbnails: HashMap::new(),
            placeholder: ui::gallery::placeholder_handle(),
            status: "Ready.".to_string(),
            uploading: false,
        };

        let task = app.run_plan(startup);
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchInputChanged(value) => {
                self.text_form.input = value;
                Task::none()
            }
            Message::SearchSubmitted => {
                // Whitespace-only input produces no request and must leave
                // the gallery untouched
                let Some(SearchRequest::Text { query }) = self.text_form.submit() else {
                    return Task::none();
                };

                // This mode owns the gallery now
                self.url_form.clear();
                let plan = self.coordinator.submit_query(&query);
                self.run_plan(plan)
            }

            Message::UrlInputChanged(value) => {
                self.url_form.input = value;
                Task::none()
            }
            Message::UrlSearchSubmitted => {
                // Validation errors stay on the form
                let Some(SearchRequest::Url { remote_url }) = self.url_form.submit() else {
                    return Task::none();
                };

                self.text_form.clear();
                // The form path owns this fetch; the response comes back as
                // a pre-fetched result set
                let seq = self.coordinator.begin_prefetch();
                let api = self.api.clone();
                Task::perform(
                    async move { api.url_search(&remote_url).await.map_err(|e| e.to_string()) },
                    move |outcome| Message::FetchFinished { seq, outcome },
                )
            }

            Message::UploadTitleChanged(value) => {
                self.upload_form.title = value;
                Task::none()
            }
            Message::UploadDescriptionChanged(value) => {
                self.upload_form.description = value;
                Task::none()
            }
            Message::UploadTagsChanged(value) => {
                self.upload_form.tags = value;
                Task::none()
            }
            Message::UploadFilePick => {
                // Native picker, same synchronous dialog idiom as folder
                // selection elsewhere in the ecosystem
                let picked = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp", "bmp"])
                    .pick_file();

                if let Some(path) = picked {
                    self.upload_form.file = Some(path);
                    self.upload_form.error = None;
                }
                Task::none()
            }
            Message::UploadSubmitted => {
                if self.uploading {
                    return Task::none();
                }
                let Some(request) = self.upload_form.submit() else {
                    return Task::none();
                };

                self.uploading = true;
                self.status = format!("Uploading {}...", request.path.display());

                let api = self.api.clone();
                Task::perform(
                    async move { api.upload(request).await.map_err(|e| e.to_string()) },
                    Message::UploadFinished,
                )
            }
            Message::UploadFinished(outcome) => {
                self.uploading = false;
                match outcome {
                    Ok(()) => {
                        // Informational only: the gallery is not refreshed
                        self.status = "✅ Image uploaded successfully!".to_string();
                        self.upload_form.reset();
                    }
                    Err(detail) => {
                        eprintln!("❌ Upload failed: {}", detail);
                        self.status = "⚠️  Upload failed — please try again.".to_string();
                    }
                }
                Task::none()
            }

            Message::FetchFinished { seq, outcome } => {
                if self.coordinator.finish(seq, outcome) {
                    return self.refresh_thumbnails();
                }
                // Stale completion, already superseded
                Task::none()
            }
            Message::ThumbnailFetched { id, outcome } => {
                // Only a card still waiting may settle; the fallback is
                // applied at most once and never retried
                if let Some(Thumbnail::Loading) = self.thumbnails.get(&id) {
                    let thumbnail = match outcome {
                        Ok(bytes) => Thumbnail::Ready(Handle::from_bytes(bytes)),
                        Err(detail) => {
                            eprintln!("⚠️  Image for card {} failed to load: {}", id, detail);
                            Thumbnail::Fallback
                        }
                    };
                    self.thumbnails.insert(id, thumbnail);
                }
                Task::none()
            }
        }
    }

    /// Launch the fetch the coordinator asked for, if any
    fn run_plan(&self, plan: Option<FetchPlan>) -> Task<Message> {
        let api = self.api.clone();
        match plan {
            Some(FetchPlan::TextSearch { seq, query }) => Task::perform(
                async move { api.text_search(&query).await.map_err(|e| e.to_string()) },
                move |outcome| Message::FetchFinished { seq, outcome },
            ),
            Some(FetchPlan::ListAll { seq }) => Task::perform(
                async move { api.list_all().await.map_err(|e| e.to_string()) },
                move |outcome| Message::FetchFinished { seq, outcome },
            ),
            None => Task::none(),
        }
    }

    /// A new result set was adopted: reset per-card state and fetch every
    /// card's image bytes
    fn refresh_thumbnails(&mut self) -> Task<Message> {
        self.thumbnails.clear();

        let cards: Vec<(String, String)> = match self.coordinator.state() {
            GalleryState::Loaded(records) => records
                .iter()
                .map(|r| (r.id.clone(), self.resolver.resolve(&r.storage_ref)))
                .collect(),
            _ => return Task::none(),
        };

        let mut tasks = Vec::with_capacity(cards.len());
        for (id, url) in cards {
            if url.is_empty() {
                // Nothing to fetch; straight to the placeholder
                self.thumbnails.insert(id, Thumbnail::Fallback);
                continue;
            }

            self.thumbnails.insert(id.clone(), Thumbnail::Loading);
            let api = self.api.clone();
            tasks.push(Task::perform(
                async move { api.fetch_bytes(&url).await.map_err(|e| e.to_string()) },
                move |outcome| Message::ThumbnailFetched {
                    id: id.clone(),
                    outcome,
                },
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = text("pixseek").size(32);

        let search_modes = row![
            ui::forms::text_search_panel(&self.text_form),
            ui::forms::url_search_panel(&self.url_form),
        ]
        .spacing(24);

        let sidebar = ui::forms::upload_panel(&self.upload_form, self.uploading);

        let gallery =
            ui::gallery::view(self.coordinator.state(), &self.thumbnails, &self.placeholder);

        let main_area = row![
            column![search_modes, gallery].spacing(16).width(Length::Fill),
            sidebar,
        ]
        .spacing(24);

        let content = column![header, main_area, text(self.status.as_str()).size(14)]
            .spacing(16)
            .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("pixseek", PixSeek::update, PixSeek::view)
        .theme(PixSeek::theme)
        .centered()
        .run_with(PixSeek::new)
}
