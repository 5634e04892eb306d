//! Shared color constants for the UI.

use egui::Color32;

/// Red color for error/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Background of highlighted rows in light mode.
pub const ROW_HIGHLIGHT_LIGHT: Color32 = Color32::from_rgb(232, 240, 254);

/// Background of highlighted rows in dark mode.
pub const ROW_HIGHLIGHT_DARK: Color32 = Color32::from_rgb(40, 52, 72);

/// Row highlight matching the current theme.
#[inline]
pub fn row_highlight(dark_mode: bool) -> Color32 {
    if dark_mode {
        ROW_HIGHLIGHT_DARK
    } else {
        ROW_HIGHLIGHT_LIGHT
    }
}
