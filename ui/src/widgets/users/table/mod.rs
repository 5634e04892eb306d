//! Table components for the users list.
//!
//! - `columns`: Column definitions and sizes
//! - `header`: Table header rendering
//! - `row`: Individual row rendering with cells
//! - `cells`: Cell rendering functions for each column type

mod cells;
pub mod columns;
pub mod header;
pub mod row;

use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;
use roster_business::users::{TableStyle, UserEntity};

use super::UsersAction;
use crate::labels::Labels;
use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::render_user_row;

/// Renders the derived rows. Returns the delete clicked this frame, if any.
pub fn render_users_table(
    ui: &mut Ui,
    labels: &Labels,
    rows: &[UserEntity],
    style: TableStyle,
) -> Option<UsersAction> {
    let mut action = None;

    let mut table = TableBuilder::new(ui)
        .id_salt("users_table")
        .striped(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns() {
        table = table.column(column);
    }

    table
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header, labels);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let index = row.index();
                let user = &rows[index];
                if let Some(clicked) =
                    render_user_row(&mut row, user, style.highlights_row(index), labels)
                {
                    action = Some(clicked);
                }
            });
        });

    action
}
