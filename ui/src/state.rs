use roster_business::{BusinessConfig, users};
use roster_states::StateCtx;

use crate::labels::Labels;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Text shown by the widgets.
    pub labels: Labels,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(BusinessConfig::default())
    }
}

impl State {
    pub fn with_config(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();
        users::register(&mut ctx, config);

        Self {
            ctx,
            labels: Labels::default(),
        }
    }

    /// State wired to a mock server.
    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}
