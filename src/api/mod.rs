//! Remote search API client
//!
//! Thin boundary around the image-search service. Everything wire-shaped
//! stays in this module: the two response envelopes (`results` for search
//! endpoints, `images` for the listing endpoint) and the legacy field
//! spellings (`_id`, `s3_path` / `url` / `s3_url`) are normalized into
//! canonical [`ImageRecord`]s before anything reaches the coordinator.

use serde::Deserialize;
use thiserror::Error;

use crate::state::data::{ImageRecord, UploadRequest};

/// Everything that can go wrong talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout, or other transport-level failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not match the expected envelope
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upload file could not be read
    #[error("could not read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The upload file is not in a recognized image format
    #[error("{path} does not look like an image file")]
    NotAnImage { path: String },
}

/// HTTP client for the image-search service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Free-text search. Returns the normalized, ordered result set.
    pub async fn text_search(&self, query: &str) -> Result<Vec<ImageRecord>, ApiError> {
        let body = self
            .post_for_body(&format!("{}/images/search/text", self.base_url), &[("query", query)])
            .await?;
        parse_search_response(&body)
    }

    /// Similarity search against a remote image URL
    pub async fn url_search(&self, image_url: &str) -> Result<Vec<ImageRecord>, ApiError> {
        let body = self
            .post_for_body(
                &format!("{}/image/search/url/", self.base_url),
                &[("image_url", image_url)],
            )
            .await?;
        parse_search_response(&body)
    }

    /// The default browse view: everything in the index
    pub async fn list_all(&self) -> Result<Vec<ImageRecord>, ApiError> {
        let response = self
            .http
            .get(format!("{}/images/list", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        parse_list_response(&response.text().await?)
    }

    /// Upload an image with its metadata. The response carries no payload
    /// we consume; success or failure is all the caller gets.
    pub async fn upload(&self, request: UploadRequest) -> Result<(), ApiError> {
        let path_display = request.path.display().to_string();

        let bytes = tokio::fs::read(&request.path)
            .await
            .map_err(|source| ApiError::File {
                path: path_display.clone(),
                source,
            })?;

        // Cheap sanity check before shipping megabytes to the server
        if image::guess_format(&bytes).is_err() {
            return Err(ApiError::NotAnImage { path: path_display });
        }

        let file_name = request
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let form = reqwest::multipart::Form::new()
            .text("title", request.title)
            .text("description", request.description)
            .text("tags", request.tags.join(","))
            .part(
                "image",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .http
            .post(format!("{}/images/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(())
    }

    /// Fetch raw bytes from an already-resolved URL (card thumbnails)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// POST with query parameters, returning the body of a successful
    /// response
    async fn post_for_body(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let response = self.http.post(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// One image as the wire sends it. Older records use `_id` and `s3_path`;
/// newer ones use `id` and `url` or `s3_url`.
#[derive(Debug, Deserialize)]
struct WireImage {
    #[serde(default, alias = "_id")]
    id: String,
    #[serde(default)]
    s3_path: Option<String>,
    #[serde(default, alias = "s3_url")]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    similarity_score: Option<f64>,
}

impl From<WireImage> for ImageRecord {
    fn from(wire: WireImage) -> Self {
        ImageRecord {
            id: wire.id,
            // First present wins, matching what the service historically
            // populated
            storage_ref: wire.s3_path.or(wire.url).unwrap_or_default(),
            title: wire.title,
            description: wire.description,
            tags: wire.tags,
            similarity_score: wire.similarity_score,
        }
    }
}

/// Search endpoints wrap the sequence under `results`
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<WireImage>,
}

/// The listing endpoint wraps the sequence under `images`
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    images: Vec<WireImage>,
}

fn parse_search_response(body: &str) -> Result<Vec<ImageRecord>, ApiError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope.results.into_iter().map(Into::into).collect())
}

fn parse_list_response(body: &str) -> Result<Vec<ImageRecord>, ApiError> {
    let envelope: ListEnvelope = serde_json::from_str(body)?;
    Ok(envelope.images.into_iter().map(Into::into).collect())
}
