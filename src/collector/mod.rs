// Concurrent score collection
//
// One lookup task per roster entry feeds a single aggregation point that stops
// on completion or after an idle period, then the collected records are ranked.

pub use aggregator::collect;
pub use dispatcher::{dispatch, Dispatch};
pub use errors::CollectorError;
pub use models::{Collection, CollectionReport, ResultRecord, Standings, StopReason};
pub use ranker::{individual_ranking, rank, team_totals, winning_team};
pub use service::{CollectorConfig, ScoreCollector, ScoreCollectorBuilder};

mod aggregator;
mod dispatcher;
mod errors;
mod models;
mod ranker;
mod service;
