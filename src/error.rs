//! Domain errors shared by the catalog, cart and order services.

use bookshop_db::StoreError;
use bookshop_http::error::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    /// A caller-supplied value is out of range or malformed.
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The backing store could not serve the request.
    #[error(transparent)]
    DataUnavailable(StoreError),
}

impl From<StoreError> for ShopError {
    fn from(err: StoreError) -> Self {
        match err {
            // the store refused a record the caller built
            StoreError::InvalidRecord { entity, id, reason } => Self::InvalidArgument {
                field: entity,
                message: format!("{} {} rejected: {}", entity, id, reason),
            },
            other => Self::DataUnavailable(other),
        }
    }
}

impl ShopError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for positive-id checks
    pub(crate) fn require_positive(field: &'static str, value: i32) -> Result<(), Self> {
        if value <= 0 {
            tracing::warn!(field, value, "rejected non-positive argument");
            return Err(Self::invalid(field, "must be greater than zero"));
        }
        Ok(())
    }
}

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        match err {
            ShopError::InvalidArgument { field, message } => AppError::validation(
                vec![json!({ "field": field, "error": message })],
                format!("invalid {}: {}", field, message),
            ),
            ShopError::NotFound { .. } => AppError::not_found(err.to_string()),
            ShopError::DataUnavailable(source) => {
                tracing::error!(error = %source, "data store call failed");
                AppError::unavailable("the data store is temporarily unavailable")
            }
        }
    }
}
