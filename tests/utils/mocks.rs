use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use teamscore::{LookupError, ScoreClient};

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Score(i64),
    ScoreAfter(i64, Duration),
    Fail(LookupError),
    Hang,
}

#[derive(Clone, Default)]
pub struct ScriptedScoreClient {
    replies: HashMap<String, Reply>,
    calls: Arc<RwLock<Vec<String>>>,
}

#[allow(dead_code)]
impl ScriptedScoreClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, participant: &str, reply: Reply) -> Self {
        self.replies.insert(participant.to_string(), reply);
        self
    }

    pub fn with_score(self, participant: &str, score: i64) -> Self {
        self.with_reply(participant, Reply::Score(score))
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl ScoreClient for ScriptedScoreClient {
    async fn fetch_score(&self, participant: &str) -> Result<i64, LookupError> {
        self.calls.write().await.push(participant.to_string());

        match self.replies.get(participant).cloned() {
            Some(Reply::Score(score)) => Ok(score),
            Some(Reply::ScoreAfter(score, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(score)
            }
            Some(Reply::Fail(error)) => Err(error),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(LookupError::Status { status: 404 }),
        }
    }
}
