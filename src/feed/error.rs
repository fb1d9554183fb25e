use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong between asking for the feed and holding a
/// typed batch of records. Any of these sends the loader down the fallback
/// path.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feed request timed out after {}", format_timeout(.0))]
    Timeout(Duration),

    #[error("Feed returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed feed data: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Background fetch failed: {0}")]
    Task(String),
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// Maximum length for error response bodies carried in the error
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl FeedError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        };
        FeedError::Status { status, body }
    }

    /// Short form for the status bar
    pub fn summary(&self) -> &'static str {
        match self {
            FeedError::Network(_) => "network error",
            FeedError::Timeout(_) => "timed out",
            FeedError::Status { .. } => "bad response status",
            FeedError::Shape(_) => "malformed data",
            FeedError::Task(_) => "fetch task failed",
        }
    }
}
