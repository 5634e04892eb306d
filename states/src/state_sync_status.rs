#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never observed by `run_computed`.
    #[default]
    Init,
    Dirty,
    Clean,
}

impl StateSyncStatus {
    pub fn needs_sync(self) -> bool {
        !matches!(self, Self::Clean)
    }
}
