//! The users screen: toolbar, load status and the users table.
//!
//! Widgets only read from the context while drawing and return the actions the
//! user triggered; the actions are applied once the frame's widgets are done.

mod status;
pub mod table;
mod toolbar;

use egui::{Response, Ui};
use log::debug;
use roster_business::users::{
    self, DerivedUsersCompute, LoadUsersCompute, TableStyle, ViewControls,
};
use roster_states::StateCtx;
use ustr::Ustr;

use crate::labels::Labels;

pub use status::render_status;
pub use table::render_users_table;
pub use toolbar::render_toolbar;

/// Something the user asked for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersAction {
    ToggleColorColumns,
    ToggleSortByCountry,
    Reset,
    Filter(String),
    Delete(Ustr),
}

/// Displays the users screen and applies whatever the user did.
pub fn users_panel(state_ctx: &mut StateCtx, labels: &Labels, ui: &mut Ui) -> Response {
    let mut actions = Vec::new();

    let response = ui
        .vertical(|ui| {
            let controls = state_ctx.state::<ViewControls>();
            let style = *state_ctx.state::<TableStyle>();

            actions.extend(render_toolbar(ui, labels, controls, style));

            let rows = state_ctx.compute::<DerivedUsersCompute>().rows();
            let status = &state_ctx.compute::<LoadUsersCompute>().status;
            render_status(ui, labels, status, rows.len());

            ui.add_space(8.0);
            actions.extend(render_users_table(ui, labels, rows, style));
        })
        .response;

    for action in actions {
        apply_action(state_ctx, action);
    }

    response
}

pub fn apply_action(state_ctx: &mut StateCtx, action: UsersAction) {
    debug!("Users action: {action:?}");
    match action {
        UsersAction::ToggleColorColumns => users::toggle_color_columns(state_ctx),
        UsersAction::ToggleSortByCountry => users::toggle_sort_by_country(state_ctx),
        UsersAction::Reset => users::reset_to_snapshot(state_ctx),
        UsersAction::Filter(text) => users::set_filter_country(state_ctx, &text),
        UsersAction::Delete(id) => users::delete_user(state_ctx, id.as_str()),
    }
}
