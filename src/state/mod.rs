/// State management module
///
/// This module handles all application state, including:
/// - The gallery state machine and fetch coordination (gallery.rs)
/// - Shared data structures (data.rs)
/// - Search-mode input forms and their validation (forms.rs)
pub mod data;
pub mod forms;
pub mod gallery;
