use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::feed::{FeedClient, FeedError, RawScoreRecord};
use crate::roster::{build_climbers, derive_divisions, ClimberMap, Division};

/// Notice attached to a dataset that replaced an unavailable live feed
pub const FALLBACK_NOTICE: &str = "Live data unavailable. Showing mock data instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Mock,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Mock => "mock",
        }
    }
}

/// A complete, immutable view of the competition at one point in time.
///
/// Datasets are never patched: a refresh builds a new one and the caller
/// swaps it in whole.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub climbers: ClimberMap,
    pub divisions: Vec<Division>,
    pub source: DataSource,
    pub fetched_at: DateTime<Utc>,
    /// Set when the data is not what the user asked for (e.g. fallback)
    pub notice: Option<String>,
}

impl Dataset {
    /// Run the aggregation pipeline over a batch of records
    pub fn from_records(records: &[RawScoreRecord], source: DataSource) -> Self {
        let climbers = build_climbers(records);
        let divisions = derive_divisions(&climbers);
        debug!(
            records = records.len(),
            climbers = climbers.len(),
            divisions = divisions.len(),
            source = source.label(),
            "built dataset"
        );
        Self {
            climbers,
            divisions,
            source,
            fetched_at: Utc::now(),
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }
}

/// Build a dataset from freshly generated mock records
pub fn mock_dataset() -> Dataset {
    let records = crate::mock::generate_mock_records(&mut rand::thread_rng());
    Dataset::from_records(&records, DataSource::Mock)
}

/// Fetch the live feed and aggregate it. Any failure is returned as is.
pub async fn fetch_dataset(client: &FeedClient) -> Result<Dataset, FeedError> {
    let records = client.fetch_records().await?;
    let dataset = Dataset::from_records(&records, DataSource::Live);
    info!(
        url = client.url(),
        climbers = dataset.climbers.len(),
        "loaded live results"
    );
    Ok(dataset)
}

/// Fetch the live feed, falling back to mock data if it cannot be loaded.
///
/// Never fails: the worst outcome is placeholder data with a notice.
pub async fn load_dataset(client: &FeedClient) -> Dataset {
    match fetch_dataset(client).await {
        Ok(dataset) => dataset,
        Err(e) => fallback_dataset(&e),
    }
}

/// The dataset installed when the live feed failed with `err`
pub fn fallback_dataset(err: &FeedError) -> Dataset {
    warn!(error = %err, "live results unavailable, using mock data");
    mock_dataset().with_notice(FALLBACK_NOTICE)
}
