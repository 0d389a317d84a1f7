use thiserror::Error;

/// Why a single participant's score could not be obtained.
///
/// Carried inside a result record, so it holds rendered messages instead of
/// the transport's own error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Score service unreachable: {0}")]
    Unreachable(String),

    #[error("Score service responded with status {status}")]
    Status { status: u16 },

    #[error("Score service returned an empty response")]
    EmptyResponse,

    #[error("Score parse error: {body:?} is not an integer")]
    Parse { body: String },
}
