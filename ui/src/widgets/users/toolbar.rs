//! Buttons and the country filter above the table.

use egui::{Button, TextEdit, Ui};
use roster_business::users::{TableStyle, ViewControls};

use super::UsersAction;
use crate::labels::Labels;

const FILTER_WIDTH: f32 = 180.0;

/// Renders the toolbar and returns the actions clicked this frame.
pub fn render_toolbar(
    ui: &mut Ui,
    labels: &Labels,
    controls: &ViewControls,
    style: TableStyle,
) -> Vec<UsersAction> {
    let mut actions = Vec::new();

    ui.horizontal_wrapped(|ui| {
        if ui
            .add(Button::new(labels.color_columns).selected(style.color_columns()))
            .clicked()
        {
            actions.push(UsersAction::ToggleColorColumns);
        }

        let sorted = controls.sort_by_country();
        if ui
            .add(Button::new(labels.sort_toggle(sorted)).selected(sorted))
            .clicked()
        {
            actions.push(UsersAction::ToggleSortByCountry);
        }

        if ui.button(labels.reset).clicked() {
            actions.push(UsersAction::Reset);
        }

        // The filter text lives in ViewControls; the edit buffer is per frame.
        let mut filter = controls.filter_country().unwrap_or_default().to_owned();
        let response = ui.add(
            TextEdit::singleline(&mut filter)
                .hint_text(labels.filter_hint)
                .desired_width(FILTER_WIDTH),
        );
        if response.changed() {
            actions.push(UsersAction::Filter(filter));
        }
    });

    actions
}
