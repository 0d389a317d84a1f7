use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    #[error("No results were collected; no winner can be determined")]
    EmptyCollection,
}
