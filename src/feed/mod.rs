pub mod client;
pub mod error;
pub mod types;

pub use client::{create_client, install_crypto_provider, parse_records, FeedClient};
pub use error::FeedError;
pub use types::{RawAttempt, RawClimber, RawProblem, RawScoreRecord};

/// Default results endpoint
pub const DEFAULT_FEED_URL: &str = "https://climbingcompscore.com/api/results";
