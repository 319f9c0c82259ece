//! Search-mode input forms
//!
//! Each search mode owns a small form struct: the raw widget values plus
//! the validation that turns them into a request. Validation failures stay
//! on the form (shown next to it) and never reach the coordinator.

use std::path::PathBuf;

use super::data::{SearchRequest, UploadRequest};

/// Free-text search input
#[derive(Debug, Clone, Default)]
pub struct TextQueryForm {
    /// Raw text-box contents
    pub input: String,
}

impl TextQueryForm {
    /// Build a request from the current input. Whitespace-only input
    /// produces nothing (and must cause no submission at all).
    pub fn submit(&self) -> Option<SearchRequest> {
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }
        Some(SearchRequest::Text {
            query: query.to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

/// Image-URL similarity search input
#[derive(Debug, Clone, Default)]
pub struct UrlSearchForm {
    /// Raw text-box contents
    pub input: String,
    /// Validation message shown under the field, if any
    pub error: Option<String>,
}

impl UrlSearchForm {
    /// Validate the input as a http(s) URL and build a request.
    /// On failure the error is recorded on the form and `None` returned.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let input = self.input.trim();
        if input.is_empty() {
            self.error = Some("Enter an image URL".to_string());
            return None;
        }

        match url::Url::parse(input) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                self.error = None;
                Some(SearchRequest::Url {
                    remote_url: parsed.to_string(),
                })
            }
            _ => {
                self.error = Some("Not a valid http(s) URL".to_string());
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }
}

/// Upload form: metadata fields plus the picked file
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    /// Comma-separated tags, split at submit time
    pub tags: String,
    /// File chosen via the native picker
    pub file: Option<PathBuf>,
    /// Validation message shown under the form, if any
    pub error: Option<String>,
}

impl UploadForm {
    /// Validate all fields and build the upload payload. Every field is
    /// required; the first missing one is reported.
    pub fn submit(&mut self) -> Option<UploadRequest> {
        let title = self.title.trim();
        if title.is_empty() {
            self.error = Some("Title is required".to_string());
            return None;
        }

        let description = self.description.trim();
        if description.is_empty() {
            self.error = Some("Description is required".to_string());
            return None;
        }

        let tags = split_tags(&self.tags);
        if tags.is_empty() {
            self.error = Some("At least one tag is required".to_string());
            return None;
        }

        let Some(path) = self.file.clone() else {
            self.error = Some("Choose an image file".to_string());
            return None;
        };

        self.error = None;
        Some(UploadRequest {
            title: title.to_string(),
            description: description.to_string(),
            tags,
            path,
        })
    }

    /// Name of the picked file, for display
    pub fn file_name(&self) -> Option<String> {
        self.file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }

    /// Reset to a blank form (after a successful upload)
    pub fn reset(&mut self) {
        *self = UploadForm::default();
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags,
/// preserving order
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
