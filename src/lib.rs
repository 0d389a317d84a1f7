// Library crate for the team score collector
// This file exposes the public API for integration tests

pub mod collector;
pub mod config;
pub mod presentation;
pub mod roster;
pub mod scoring;

// Re-export commonly used types for easier access in tests
pub use collector::{
    CollectionReport, CollectorConfig, CollectorError, ResultRecord, ScoreCollector, Standings,
    StopReason,
};
pub use roster::{load_roster, parse_roster, Roster, RosterError};
pub use scoring::{HttpScoreClient, LookupError, ScoreClient, ScoreServiceConfig};
