use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound body of `POST /api/v1/chat`.
///
/// No field is validated. Missing and `null` fields read as empty strings
/// and any other non-string value is kept as its JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub native_language: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_language: String,
    #[serde(deserialize_with = "lenient_string")]
    pub difficulty: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl ErrorResponse {
    pub const INTERNAL: ErrorResponse = ErrorResponse {
        error: "Internal Server Error",
    };
}
