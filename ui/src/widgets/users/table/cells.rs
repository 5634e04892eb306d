//! Cell rendering functions for the users table.

use egui::{Image, Ui, Vec2};

use super::columns::PORTRAIT_SIZE;

/// Renders the round portrait, loaded from its URL by the installed image loaders.
#[inline]
pub fn render_picture_cell(ui: &mut Ui, url: &str) {
    ui.add(
        Image::new(url)
            .fit_to_exact_size(Vec2::splat(PORTRAIT_SIZE))
            .corner_radius(PORTRAIT_SIZE / 2.0),
    );
}

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.label(text);
}

/// Returns `true` if the delete button was clicked.
#[inline]
pub fn render_delete_cell(ui: &mut Ui, label: &str) -> bool {
    ui.button(label).clicked()
}
