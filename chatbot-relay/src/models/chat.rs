use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Body of `POST /api/chatbot`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatbotRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub question: String,
}

/// Successful relay reply. `response` is normally a string; other JSON
/// values from the upstream are passed through unchanged.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatbotResponse {
    pub response: Value,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
