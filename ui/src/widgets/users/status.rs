use egui::Ui;
use roster_business::users::LoadUsersStatus;

use crate::labels::Labels;
use crate::utils::colors::COLOR_RED;

/// Load status line: spinner while loading, the error once failed, the row count otherwise.
pub fn render_status(ui: &mut Ui, labels: &Labels, status: &LoadUsersStatus, shown: usize) {
    match status {
        LoadUsersStatus::Idle | LoadUsersStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(labels.loading);
            });
        }
        LoadUsersStatus::Failed(err) => {
            ui.colored_label(COLOR_RED, err.to_string());
        }
        LoadUsersStatus::Loaded { count, fetched_at } => {
            ui.label(labels.users_count(shown)).on_hover_text(format!(
                "{count} fetched at {}",
                fetched_at.format("%H:%M:%S UTC")
            ));
        }
    }
}
