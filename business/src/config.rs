use roster_states::{State, state_assign_impl};
use std::any::Any;

pub const DEFAULT_API_BASE_URL: &str = "https://randomuser.me";
pub const DEFAULT_RESULTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Number of users requested from the API.
    pub results: usize,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            results: DEFAULT_RESULTS,
        }
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = results;
        self
    }

    pub fn users_url(&self) -> String {
        format!(
            "{}/api/?results={}",
            self.api_base_url.trim_end_matches('/'),
            self.results
        )
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send + 'static>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
