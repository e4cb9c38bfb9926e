//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Malformed clause in a textual filter specification
    #[error("invalid filter clause '{clause}': {message}")]
    FilterParse { clause: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error from a sink
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sink adapter failure with sink name
    #[error("sink '{sink}' failed: {message}")]
    SinkFailure { sink: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a filter parse error for a malformed clause
    pub fn filter_parse(clause: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::FilterParse {
            clause: clause.into(),
            message: message.into(),
        }
    }

    /// Create a sink failure error
    pub fn sink_failure(sink: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SinkFailure {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }
}
