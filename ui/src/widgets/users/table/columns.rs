//! Column definitions for the users table.

use egui_extras::Column;

pub const PICTURE_WIDTH: f32 = 56.0;
pub const ACTIONS_WIDTH: f32 = 100.0;
pub const PORTRAIT_SIZE: f32 = 40.0;
pub const ROW_HEIGHT: f32 = 48.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Table column configuration, in order:
/// - Picture (fixed)
/// - First name, last name, country (flexible)
/// - Actions (fixed)
#[inline]
pub fn table_columns() -> Vec<Column> {
    vec![
        Column::exact(PICTURE_WIDTH),       // Picture
        Column::auto().at_least(100.0),     // First name
        Column::auto().at_least(100.0),     // Last name
        Column::remainder().at_least(80.0), // Country
        Column::exact(ACTIONS_WIDTH),       // Actions
    ]
}
