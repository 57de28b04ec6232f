/// Options for the row generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Number of calendar days, ending at the end date, that timestamps span.
    pub window_days: u32,
    /// Number of distinct users events are attributed to.
    pub user_pool: usize,
    /// Fixed RNG seed; a random seed is drawn and logged when unset.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            window_days: 7,
            user_pool: 25,
            seed: None,
        }
    }
}
