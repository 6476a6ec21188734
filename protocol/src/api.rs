//! Request bodies and auxiliary replies of the backend REST API.

use serde::{Deserialize, Serialize};

use crate::status::Difficulty;

/// Endpoint paths, relative to the configured backend base URL.
pub mod paths {
    pub const CATEGORIES: &str = "/api/categories";
    pub const START: &str = "/api/start";
    pub const STATUS: &str = "/api/status";
    pub const GUESS: &str = "/api/guess";
    pub const DAILY_START: &str = "/api/daily/start";
    pub const DAILY_STATUS: &str = "/api/daily/status";
    pub const DAILY_GUESS: &str = "/api/daily/guess";
    pub const AI_HINT: &str = "/api/ai-hint";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub custom_topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStartRequest {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGuessRequest {
    pub letter: char,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiHintResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiHintResponse {
    /// The hint text when generation succeeded, otherwise the error message
    /// to show inline.
    pub fn into_result(self) -> Result<String, String> {
        match (self.success, self.hint) {
            (true, Some(hint)) if !hint.trim().is_empty() => Ok(hint),
            _ => Err(self
                .error
                .unwrap_or_else(|| "Could not generate hint".to_string())),
        }
    }
}

/// Body of every non-2xx backend reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_uses_backend_field_names() {
        let body = serde_json::to_value(StartGameRequest {
            category: "Custom".into(),
            difficulty: Difficulty::Hard,
            custom_topic: "volcanoes".into(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "category": "Custom",
                "difficulty": "hard",
                "custom_topic": "volcanoes"
            })
        );
    }

    #[test]
    fn ai_hint_without_text_is_an_error() {
        let reply = AiHintResponse {
            success: true,
            hint: None,
            error: None,
        };
        assert_eq!(reply.into_result(), Err("Could not generate hint".into()));
    }
}
