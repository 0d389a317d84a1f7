use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tokio::task::JoinHandle;

pub const SCORE_PATH: &str = "/GameService/getScore";

/// What the fake service answers for one participant
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum FakeReply {
    Body(&'static str),
    Status(StatusCode),
    Hang,
}

/// In-process score service speaking the plain-text protocol
pub struct FakeScoreService {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeScoreService {
    pub async fn start(replies: HashMap<String, FakeReply>) -> Self {
        let app = Router::new()
            .route(&format!("{SCORE_PATH}/:participant"), get(score))
            .with_state(Arc::new(replies));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, SCORE_PATH)
    }
}

impl Drop for FakeScoreService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn score(
    State(replies): State<Arc<HashMap<String, FakeReply>>>,
    Path(participant): Path<String>,
) -> (StatusCode, String) {
    match replies.get(&participant) {
        Some(FakeReply::Body(body)) => (StatusCode::OK, body.to_string()),
        Some(FakeReply::Status(status)) => (*status, String::new()),
        Some(FakeReply::Hang) => std::future::pending().await,
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
