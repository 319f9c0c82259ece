//! Gallery projection
//!
//! Pure view code: turns the current [`GalleryState`] into widgets. No
//! business logic lives here — which cards exist, and in what order, is
//! entirely the coordinator's decision.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{column, container, scrollable, text, Column, Image, Row};
use iced::{Alignment, Element, Length};

use crate::state::data::ImageRecord;
use crate::state::gallery::GalleryState;
use crate::Message;

/// Cards per grid row
const GRID_COLUMNS: usize = 3;
/// Display size of one card image
const CARD_IMAGE_WIDTH: f32 = 220.0;
const CARD_IMAGE_HEIGHT: f32 = 160.0;

/// Per-card image state. Set to `Fallback` at most once, on the first
/// load failure; never retried.
#[derive(Debug, Clone)]
pub enum Thumbnail {
    /// Bytes are still being fetched
    Loading,
    /// Decoded and ready to draw
    Ready(Handle),
    /// The reference was empty or the fetch failed; draw the placeholder
    Fallback,
}

/// Build the gallery view for the current state
pub fn view<'a>(
    state: &'a GalleryState,
    thumbnails: &'a HashMap<String, Thumbnail>,
    placeholder: &Handle,
) -> Element<'a, Message> {
    match state {
        GalleryState::Idle => column![].into(),
        GalleryState::Loading => marker("Loading images..."),
        GalleryState::Failed(message) => {
            container(text(message.clone()).size(18).style(text::danger))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(40)
                .into()
        }
        GalleryState::Empty => marker("No images found"),
        GalleryState::Loaded(records) => grid(records, thumbnails, placeholder),
    }
}

/// Centered one-line status marker (loading / no results)
fn marker(label: &str) -> Element<'_, Message> {
    container(text(label.to_string()).size(18))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(40)
        .into()
}

/// Fixed-column card grid, scrollable
fn grid<'a>(
    records: &'a [ImageRecord],
    thumbnails: &'a HashMap<String, Thumbnail>,
    placeholder: &Handle,
) -> Element<'a, Message> {
    let mut rows = Column::new().spacing(16);

    for chunk in records.chunks(GRID_COLUMNS) {
        let mut grid_row = Row::new().spacing(16);
        for record in chunk {
            grid_row = grid_row.push(card(record, thumbnails, placeholder));
        }
        rows = rows.push(grid_row);
    }

    scrollable(rows).height(Length::Fill).into()
}

/// One result card: the image plus whatever metadata the record carries
fn card<'a>(
    record: &'a ImageRecord,
    thumbnails: &'a HashMap<String, Thumbnail>,
    placeholder: &Handle,
) -> Element<'a, Message> {
    let handle = match thumbnails.get(&record.id) {
        Some(Thumbnail::Ready(handle)) => handle.clone(),
        // Loading, Fallback, or not yet scheduled
        _ => placeholder.clone(),
    };

    let mut card = column![Image::new(handle)
        .width(Length::Fixed(CARD_IMAGE_WIDTH))
        .height(Length::Fixed(CARD_IMAGE_HEIGHT))]
    .spacing(6)
    .align_x(Alignment::Start);

    if let Some(title) = &record.title {
        card = card.push(text(title.clone()).size(16));
    }
    if let Some(description) = &record.description {
        card = card.push(text(description.clone()).size(13));
    }
    if let Some(tags) = &record.tags {
        card = card.push(text(format!("Tags: {}", tags.join(", "))).size(12));
    }
    if let Some(score) = record.similarity_score {
        card = card.push(text(similarity_label(score)).size(12));
    }

    container(card)
        .width(Length::Fixed(CARD_IMAGE_WIDTH))
        .padding(8)
        .into()
}

/// Similarity as a percentage with two decimal places
fn similarity_label(score: f64) -> String {
    format!("Similarity: {:.2}%", score * 100.0)
}

/// Generated neutral checkerboard shown for broken or still-loading
/// images. Built once at startup; no binary asset in the tree.
pub fn placeholder_handle() -> Handle {
    const SIZE: u32 = 64;
    const CELL: u32 = 8;

    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let light = ((x / CELL) + (y / CELL)) % 2 == 0;
            let value = if light { 0x3c } else { 0x2d };
            pixels.extend_from_slice(&[value, value, value, 0xff]);
        }
    }

    Handle::from_rgba(SIZE, SIZE, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_two_decimal_percentage() {
        assert_eq!(similarity_label(0.8765), "Similarity: 87.65%");
        assert_eq!(similarity_label(1.0), "Similarity: 100.00%");
        assert_eq!(similarity_label(0.0), "Similarity: 0.00%");
    }

    #[test]
    fn test_similarity_rounds_not_truncates() {
        assert_eq!(similarity_label(0.12349), "Similarity: 12.35%");
    }
}
