//! HTTP request and response bodies used by the mini app

use crate::WorkoutEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/log` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogRequest {
    /// Kept as raw JSON so that a string or missing id is a mismatch, not a parse failure
    #[serde(default)]
    pub user_id: Value,
    /// Raw as well, so a stranger is refused before the body's shape matters
    #[serde(default)]
    pub entry: Value,
    #[serde(default, rename = "type")]
    pub category: Value,
}

impl LogRequest {
    pub fn claimed_user_id(&self) -> Option<i64> {
        claimed_user_id(&self.user_id)
    }

    /// Entry text; anything but a JSON string reads as empty
    pub fn details(&self) -> &str {
        self.entry.as_str().unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_str()
    }
}

/// `POST /api/history` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryRequest {
    #[serde(default)]
    pub user_id: Value,
}

impl HistoryRequest {
    pub fn claimed_user_id(&self) -> Option<i64> {
        claimed_user_id(&self.user_id)
    }
}

/// Only a JSON integer can name a user.
///
/// Floats never match, even `6629263251.0`.
pub fn claimed_user_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogResponse {
    pub status: ApiStatus,
    pub message: String,
    pub entry: WorkoutEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub status: ApiStatus,
    pub history: Vec<WorkoutEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ApiStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claimed_user_id_only_accepts_integers() {
        assert_eq!(claimed_user_id(&json!(6629263251_i64)), Some(6629263251));
        assert_eq!(claimed_user_id(&json!("6629263251")), None);
        assert_eq!(claimed_user_id(&json!(null)), None);
        assert_eq!(claimed_user_id(&json!(1.5)), None);
        assert_eq!(claimed_user_id(&json!(6629263251.0)), None);
    }

    #[test]
    fn test_log_request_tolerates_missing_fields() {
        let req: LogRequest = serde_json::from_value(json!({ "entry": "run" })).unwrap();
        assert_eq!(req.claimed_user_id(), None);
        assert_eq!(req.details(), "run");
        assert_eq!(req.category(), None);

        let req: LogRequest =
            serde_json::from_value(json!({ "user_id": 7, "entry": "row", "type": "Other" }))
                .unwrap();
        assert_eq!(req.claimed_user_id(), Some(7));
        assert_eq!(req.category(), Some("Other"));
    }

    #[test]
    fn test_log_request_accepts_any_field_shapes() {
        let req: LogRequest =
            serde_json::from_value(json!({ "user_id": 1, "entry": 5, "type": 7 })).unwrap();
        assert_eq!(req.claimed_user_id(), Some(1));
        assert_eq!(req.details(), "");
        assert_eq!(req.category(), None);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Unauthorized user.")).unwrap();
        assert_eq!(body, json!({ "status": "error", "message": "Unauthorized user." }));
    }
}
