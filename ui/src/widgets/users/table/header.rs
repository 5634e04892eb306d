//! Table header rendering for the users table.

use egui::Ui;
use egui_extras::TableRow;

use crate::labels::Labels;

/// Renders the table header with bold labels.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>, labels: &Labels) {
    for label in [
        labels.header_picture,
        labels.header_first_name,
        labels.header_last_name,
        labels.header_country,
        labels.header_actions,
    ] {
        header.col(|ui| {
            render_header_cell(ui, label);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.strong(label);
}
