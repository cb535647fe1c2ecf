//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// The proxy surface deliberately exposes a single failure class to
    /// clients: every validation, business and upstream error is a 400,
    /// including NotFound. Only local system faults are 5xx.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 500 Internal Server Error (local system faults only)
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, business rules, missing
            // resources, and upstream failures)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
