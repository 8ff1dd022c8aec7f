use thiserror::Error;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the request.
    #[error("data store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid {entity} {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: i32,
        reason: String,
    },

    #[error("failed to read seed file '{path}'")]
    SeedIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed document")]
    SeedFormat(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn invalid(entity: &'static str, id: i32, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            entity,
            id,
            reason: reason.into(),
        }
    }
}
