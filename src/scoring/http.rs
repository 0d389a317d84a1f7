use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::{LookupError, ScoreClient};

pub const DEFAULT_SCORE_SERVICE_URL: &str = "http://localhost:8080/GameService/getScore";

/// Where the score service lives
#[derive(Debug, Clone)]
pub struct ScoreServiceConfig {
    /// Base URL; the participant identifier is appended as the last path segment
    pub base_url: String,
}

impl Default for ScoreServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCORE_SERVICE_URL.to_string(),
        }
    }
}

/// Score client speaking the plain-text HTTP protocol of the game service.
///
/// `GET {base_url}/{participant}` answers with a short body holding one integer.
#[derive(Debug, Clone)]
pub struct HttpScoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScoreClient {
    pub fn new(config: ScoreServiceConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, config: ScoreServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
        }
    }

    fn score_url(&self, participant: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            LookupError::Unreachable(format!("invalid score service url {}: {e}", self.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                LookupError::Unreachable(format!(
                    "score service url {} cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(participant);

        Ok(url)
    }
}

#[async_trait]
impl ScoreClient for HttpScoreClient {
    async fn fetch_score(&self, participant: &str) -> Result<i64, LookupError> {
        let url = self.score_url(participant)?;
        debug!(participant = %participant, url = %url, "Requesting score");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        parse_score(&body)
    }
}

/// Parses a score body: an optionally signed integer, decimal or with a
/// `0x`, `0o` or `0b` radix prefix. Surrounding whitespace is ignored.
///
/// Unlike Go's `strconv.ParseInt(s, 0, 0)`, a bare leading `0` does not
/// switch to octal (`"010"` is 10) and `_` digit separators are rejected.
pub fn parse_score(body: &str) -> Result<i64, LookupError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyResponse);
    }

    let parse_error = || LookupError::Parse {
        body: trimmed.to_string(),
    };

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (radix, digits) = split_radix(unsigned);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(parse_error());
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| parse_error())?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };

    i64::try_from(value).map_err(|_| parse_error())
}

fn split_radix(digits: &str) -> (u32, &str) {
    let prefixes = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    prefixes
        .iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (*radix, rest)))
        .unwrap_or((10, digits))
}
