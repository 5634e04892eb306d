//! Row rendering for the users table.

use egui::Ui;
use egui_extras::TableRow;
use roster_business::users::UserEntity;

use super::cells::{render_delete_cell, render_picture_cell, render_text_cell};
use crate::labels::Labels;
use crate::utils::colors::row_highlight;
use crate::widgets::users::UsersAction;

/// Renders a single user row: picture, first name, last name, country and the
/// delete button. Returns the delete action if the button was clicked.
#[inline]
pub fn render_user_row(
    row: &mut TableRow<'_, '_>,
    user: &UserEntity,
    highlighted: bool,
    labels: &Labels,
) -> Option<UsersAction> {
    let mut action = None;

    row.col(|ui| {
        paint_highlight(ui, highlighted);
        render_picture_cell(ui, &user.picture_url);
    });

    for text in [&user.first_name, &user.last_name, &user.country] {
        row.col(|ui| {
            paint_highlight(ui, highlighted);
            render_text_cell(ui, text);
        });
    }

    row.col(|ui| {
        paint_highlight(ui, highlighted);
        if render_delete_cell(ui, labels.delete) {
            action = Some(UsersAction::Delete(user.id));
        }
    });

    action
}

/// Fills the cell background of highlighted rows.
#[inline]
fn paint_highlight(ui: &Ui, highlighted: bool) {
    if !highlighted {
        return;
    }
    let rect = ui.max_rect();
    let color = row_highlight(ui.visuals().dark_mode);
    ui.painter().rect_filled(rect, 0.0, color);
}
