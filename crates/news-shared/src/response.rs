//! JSON error envelopes returned by the API.

use serde::{Deserialize, Serialize};

/// Error body for every failed request: `{error, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short summary, e.g. "News not found".
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("Bad Request").with_message(message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("Not Found").with_message(message)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

/// Body for requests that match no route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNotFoundResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "availableRoutes")]
    pub available_routes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("Conflict")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Conflict" }));
    }

    #[test]
    fn test_route_list_uses_camel_case_key() {
        let body = RouteNotFoundResponse {
            error: "Not Found".to_string(),
            message: "Route GET /nope not found".to_string(),
            available_routes: vec!["GET /".to_string()],
        };
        let json = serde_json::to_value(body).unwrap();
        assert!(json.get("availableRoutes").is_some());
    }
}
