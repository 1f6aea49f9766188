use thiserror::Error;

/// Per-operation failures surfaced to the UI. None of these are fatal to the
/// process; every optimistic mutation behind them has a defined rollback.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Upload Error: {0}")]
    UploadError(String),

    #[error("Persist Error: {0}")]
    PersistError(String),

    #[error("Fetch Error: {0}")]
    FetchError(String),

    #[error("Network Error: {0}")]
    NetworkError(String),
}

impl FeedError {
    /// Short machine-readable tag, useful for logging and UI dispatch.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::ValidationError(..) => "VALIDATION_ERROR",
            FeedError::UploadError(..) => "UPLOAD_ERROR",
            FeedError::PersistError(..) => "PERSIST_ERROR",
            FeedError::FetchError(..) => "FETCH_ERROR",
            FeedError::NetworkError(..) => "NETWORK_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_taxonomy_and_message() {
        let err = FeedError::UploadError("bucket rejected the object".into());
        assert_eq!(err.to_string(), "Upload Error: bucket rejected the object");
        assert_eq!(err.kind(), "UPLOAD_ERROR");
    }
}
