use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use fake::Fake;
use fake::uuid::UUIDv4;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use uuid::Uuid;

use demotron_core::SyntheticEventRow;

use crate::options::GenerateOptions;

/// Event categories emitted by the generator.
pub const EVENT_NAMES: &[&str] = &[
    "page_view",
    "product_view",
    "ad_view",
    "video_view",
    "blog_view",
];

const SECONDS_PER_DAY: i64 = 86_400;

/// Generates synthetic event rows.
#[derive(Debug, Clone, Default)]
pub struct RowGenerator {
    options: GenerateOptions,
}

impl RowGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate exactly `count` rows whose timestamps fall on or before `end_date`.
    ///
    /// Rows are ordered by timestamp.
    pub fn generate_rows(&self, count: u32, end_date: NaiveDate) -> Vec<SyntheticEventRow> {
        let seed = self.options.seed.unwrap_or_else(rand::random);
        info!(
            event = "generation_started",
            rows = count,
            end_date = %end_date,
            seed,
            "generating synthetic events"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (window_start, window_secs) = time_window(end_date, self.options.window_days);

        let users: Vec<Uuid> = (0..self.options.user_pool.max(1))
            .map(|_| UUIDv4.fake_with_rng(&mut rng))
            .collect();

        let mut rows: Vec<SyntheticEventRow> = (0..count)
            .map(|_| {
                let offset = rng.random_range(0..window_secs);
                SyntheticEventRow {
                    event_id: UUIDv4.fake_with_rng(&mut rng),
                    event_name: EVENT_NAMES[rng.random_range(0..EVENT_NAMES.len())].to_string(),
                    event_timestamp: window_start + Duration::seconds(offset),
                    user_id: users[rng.random_range(0..users.len())],
                }
            })
            .collect();
        rows.sort_by_key(|row| row.event_timestamp);

        info!(event = "generation_finished", rows = rows.len(), "synthetic events generated");
        rows
    }
}

/// Start of the window and its length in seconds; the window closes at the
/// last second of `end_date`.
fn time_window(end_date: NaiveDate, window_days: u32) -> (DateTime<Utc>, i64) {
    let back = u64::from(window_days.max(1) - 1);
    let start_date = end_date
        .checked_sub_days(Days::new(back))
        .unwrap_or(NaiveDate::MIN);
    let days = (end_date - start_date).num_days() + 1;
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    (start, days * SECONDS_PER_DAY)
}
