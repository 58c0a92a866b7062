use thiserror::Error;

/// Failures reported by the planning core.
///
/// Running out of frontier is not listed here: an exhausted search is a
/// normal terminal [`SearchState`](crate::models::SearchState).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PlanError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        PlanError::PreconditionViolation(msg.into())
    }
}
