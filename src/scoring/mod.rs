pub mod http;

mod errors;

pub use errors::LookupError;
pub use http::{parse_score, HttpScoreClient, ScoreServiceConfig};

use async_trait::async_trait;

/// Looks up the score of a single participant on a remote service.
#[async_trait]
pub trait ScoreClient: Send + Sync {
    async fn fetch_score(&self, participant: &str) -> Result<i64, LookupError>;
}
