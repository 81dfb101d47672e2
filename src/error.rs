use thiserror::Error;

/// Errors produced by the planner and its components.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed at the serde level.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The generation provider returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code (e.g. 429, 500, 503).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// An inbound format string did not match any [`LearningFormat`](crate::types::LearningFormat).
    #[error("Unknown learning format: {0}")]
    UnknownFormat(String),

    /// The pipeline reached its terminal state without an assembled plan.
    ///
    /// This is the only error class the driver propagates; everything the
    /// stages encounter is absorbed into their documented fallback values.
    #[error("Pipeline finished without a complete plan: {0}")]
    Incomplete(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PlanError {
    fn from(err: anyhow::Error) -> Self {
        PlanError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
