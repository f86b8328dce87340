use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by write operations (`{"message": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Conventional error body. Every field is optional since the service does not
/// always send one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// The server supplied message, preferring the conventional `error` field.
    pub fn message(self) -> Option<String> {
        self.error.or(self.msg).filter(|m| !m.trim().is_empty())
    }
}
