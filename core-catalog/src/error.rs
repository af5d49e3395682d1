use crate::payload::ValidationErrors;
use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Session rejected by server")]
    Unauthorized,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{failed} of {attempted} deletions failed")]
    BulkDelete { attempted: usize, failed: usize },

    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },
}

impl From<BridgeError> for CatalogError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::Timeout(_) => CatalogError::Timeout,
            other => CatalogError::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
