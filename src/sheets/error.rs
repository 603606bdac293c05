// src/sheets/error.rs

use thiserror::Error;

/// Failure taxonomy for the order operations.
///
/// Every variant is converted to a plain `{ok:false, error}` envelope at the
/// bridge boundary, so the `Display` text is what the display layer sees.
#[derive(Debug, Error)]
pub enum OrdersError {
    #[error("{0}")]
    Configuration(String),

    #[error("Sheet tab with GID {0} not found.")]
    SheetNotFound(i64),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    RemoteService(String),
}

pub type OrdersResult<T> = Result<T, OrdersError>;

impl From<reqwest::Error> for OrdersError {
    fn from(e: reqwest::Error) -> Self {
        OrdersError::RemoteService(e.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for OrdersError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        OrdersError::Configuration(format!("Invalid service account key: {}", e))
    }
}
