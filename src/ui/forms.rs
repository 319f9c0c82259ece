//! Search-mode input panels
//!
//! One panel per search mode. These are plain controlled inputs: every
//! keystroke and click becomes a `Message`, and all validation lives on
//! the form structs in `state::forms`.

use iced::widget::{button, column, row, text, text_input};
use iced::{Element, Length};

use crate::state::forms::{TextQueryForm, UploadForm, UrlSearchForm};
use crate::Message;

/// Free-text search: input plus a Search button
pub fn text_search_panel(form: &TextQueryForm) -> Element<'static, Message> {
    row![
        text_input("Search images...", &form.input)
            .on_input(Message::SearchInputChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(8),
        button("Search").on_press(Message::SearchSubmitted).padding(8),
    ]
    .spacing(8)
    .into()
}

/// Image-URL similarity search: input, button, and the validation line
pub fn url_search_panel(form: &UrlSearchForm) -> Element<'static, Message> {
    let mut panel = column![row![
        text_input("Image URL for similarity search...", &form.input)
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::UrlSearchSubmitted)
            .padding(8),
        button("Search Similar")
            .on_press(Message::UrlSearchSubmitted)
            .padding(8),
    ]
    .spacing(8)]
    .spacing(4);

    if let Some(error) = &form.error {
        panel = panel.push(text(error.clone()).size(13).style(text::danger));
    }

    panel.into()
}

/// Upload form: metadata fields, file picker, submit button
pub fn upload_panel(form: &UploadForm, uploading: bool) -> Element<'static, Message> {
    let picked = form
        .file_name()
        .unwrap_or_else(|| "No file selected".to_string());

    let mut submit = button(if uploading { "Uploading..." } else { "Upload Image" }).padding(8);
    if !uploading {
        submit = submit.on_press(Message::UploadSubmitted);
    }

    let mut panel = column![
        text("Upload an image").size(18),
        text_input("Title", &form.title)
            .on_input(Message::UploadTitleChanged)
            .padding(8),
        text_input("Description", &form.description)
            .on_input(Message::UploadDescriptionChanged)
            .padding(8),
        text_input("Tags (comma-separated)", &form.tags)
            .on_input(Message::UploadTagsChanged)
            .padding(8),
        row![
            button("Choose File")
                .on_press(Message::UploadFilePick)
                .padding(8),
            text(picked).size(13),
        ]
        .spacing(8),
        submit,
    ]
    .spacing(8)
    .width(Length::Fixed(360.0));

    if let Some(error) = &form.error {
        panel = panel.push(text(error.clone()).size(13).style(text::danger));
    }

    panel.into()
}
