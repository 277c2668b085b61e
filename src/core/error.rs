//! Failure contract for stock operations

use crate::providers::Provider;
use reqwest::StatusCode;
use thiserror::Error;

/// Broad classification of a failure, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider answered, but not with something usable.
    Upstream,
    /// The request never produced a usable response.
    Internal,
}

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Request to {provider} returned {status} for GET {uri}")]
    Status {
        provider: Provider,
        uri: String,
        status: StatusCode,
    },

    #[error("Invalid data from {provider}: {reason}")]
    InvalidData { provider: Provider, reason: String },

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse JSON response from {provider}: {source}")]
    Malformed {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StockError {
    pub fn invalid(provider: Provider, reason: impl Into<String>) -> Self {
        StockError::InvalidData {
            provider,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            StockError::Status { .. } | StockError::InvalidData { .. } => FailureKind::Upstream,
            StockError::Transport(_) | StockError::Malformed { .. } | StockError::Internal(_) => {
                FailureKind::Internal
            }
        }
    }
}

pub type Result<T, E = StockError> = std::result::Result<T, E>;
