pub mod mocks;
pub mod score_service;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{Reply, ScriptedScoreClient};
#[allow(unused_imports)]
pub use score_service::{FakeReply, FakeScoreService};
