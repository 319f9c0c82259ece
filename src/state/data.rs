//! Shared data structures for the application state
//!
//! These structs represent the canonical data model that flows between
//! the API layer and the UI layer. Wire-format quirks (field aliases,
//! response envelopes) never make it past `api/`; everything here is
//! already normalized.

use std::path::PathBuf;

/// A single image in a result set
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Stable id, unique within one result set
    pub id: String,
    /// Opaque storage reference: an s3:// locator or a direct URL
    pub storage_ref: String,
    /// Display title, if the index has one
    pub title: Option<String>,
    /// Longer description, if the index has one
    pub description: Option<String>,
    /// Ordered tags, if the index has any
    pub tags: Option<Vec<String>>,
    /// Similarity to the query in [0, 1]; only set for similarity searches
    pub similarity_score: Option<f64>,
}

/// One search submission; exactly one variant per submit.
///
/// Created by a form, consumed once by the dispatch in `update()`,
/// then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    /// Free-text search, fetched by the coordinator's own pipeline
    Text { query: String },
    /// Similarity search against a remote image URL; the form path owns
    /// this fetch and hands the response to the coordinator pre-fetched
    Url { remote_url: String },
}

/// A fully validated upload payload.
///
/// The file bytes are read at submit time from `path`; the upload response
/// is informational only and never populates the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub path: PathBuf,
}
