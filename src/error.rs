use thiserror::Error;

/// User-visible failures of a single query. Each one is terminal for the
/// query that produced it and none aborts the process.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("The query service is unavailable: {reason}. Please try again later.")]
    UpstreamUnavailable { reason: String },

    #[error("Could not understand the query. Raw interpreter output: {raw}")]
    InvalidIntentFormat { raw: String },

    #[error("Access denied: You don't have permission to view this data.")]
    AccessDenied,

    #[error("Unable to process query.")]
    UnsupportedQuery,
}
