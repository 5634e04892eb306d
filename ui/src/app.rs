use roster_business::users;

use crate::{state::State, widgets};

pub struct RosterApp {
    pub state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply results posted by running commands
        let touched = self.state.ctx.sync_computes();

        users::request_initial_load(&mut self.state.ctx);

        // Derived rows must be current before the panel reads them.
        self.state.ctx.run_computed();
        if !touched.is_empty() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.labels.title);
            ui.separator();
            widgets::users_panel(&mut self.state.ctx, &self.state.labels, ui);
        });

        // Actions applied while drawing show up on the next frame.
        if self.state.ctx.run_computed() {
            ctx.request_repaint();
        }
        self.state.ctx.flush_commands();

        // Keep polling while the load is in flight.
        if self
            .state
            .ctx
            .cached::<users::LoadUsersCompute>()
            .is_some_and(|compute| compute.status.is_loading())
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
