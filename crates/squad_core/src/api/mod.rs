//! JSON API boundary
//!
//! String-in/string-out entry points for host applications. Every response is
//! an [`ApiResponse`] envelope; failures carry an [`ApiError`] whose `code` is
//! either a [`SquadError::code`] or one of the request-level codes below.

pub mod ratings_json;
pub mod tactic_json;

pub use ratings_json::{team_ratings_json, TeamRatingsRequest, TeamRatingsResponse};
pub use tactic_json::{
    available_tactics_json, resolve_tactic_json, AvailableTacticsRequest, ResolveTacticRequest,
    TacticSummary,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SquadError;

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

pub const INVALID_JSON: &str = "INVALID_JSON";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string() }
    }
}

impl From<&SquadError> for ApiError {
    fn from(err: &SquadError) -> Self {
        Self::new(err.code(), &err.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"data":null,"error":{{"code":"{SERIALIZATION_ERROR}","message":"{}"}},"schema_version":"{API_VERSION}"}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

pub(crate) fn parse_request<R: serde::de::DeserializeOwned>(
    request_json: &str,
) -> Result<R, ApiError> {
    serde_json::from_str(request_json)
        .map_err(|e| ApiError::new(INVALID_JSON, &format!("Invalid JSON format: {e}")))
}
