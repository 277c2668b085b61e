//! Rendering of service results into the HTTP response contract.

use crate::core::StockError;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Problem description returned for every failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl ProblemDetails {
    pub fn internal_server_error() -> Self {
        ProblemDetails {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            title: "Internal Server Error".to_string(),
            detail: "Something went wrong. Please try again!".to_string(),
        }
    }
}

/// Status and JSON body to send back for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    /// 200 with the serialized value, or 500 with [`ProblemDetails`]. The
    /// failure kind is logged but never changes the response.
    pub fn from_result<T: Serialize>(result: &Result<T, StockError>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(body) => Reply {
                    status: StatusCode::OK,
                    body,
                },
                Err(e) => {
                    warn!(error = %e, "Failed to serialize response");
                    Self::failure()
                }
            },
            Err(e) => {
                warn!(kind = ?e.kind(), "Responding with problem details: {}", e);
                Self::failure()
            }
        }
    }

    fn failure() -> Self {
        let problem = ProblemDetails::internal_server_error();
        Reply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: serde_json::to_value(&problem).unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
