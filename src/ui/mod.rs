/// UI building blocks
///
/// View-only code: the gallery projection (gallery.rs) and the three
/// search-mode input panels (forms.rs). Nothing in here mutates state.
pub mod forms;
pub mod gallery;
