use thiserror::Error;

/// Errors raised by the providers and by configuration resolution.
///
/// Only `Config` and listing-phase errors are fatal to a run. Everything that
/// happens while a single repository is processed is folded into that
/// repository's outcome instead of being propagated.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source API error: {0}")]
    Source(#[from] octocrab::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Error::Auth(message),
            _ => Error::Api { status, message },
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pull a human readable message out of an error response body.
///
/// Forge APIs answer with `{"message": "..."}`; anything else is used verbatim.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .filter(|m| !m.is_empty()),
        Err(_) => Some(trimmed.to_string()),
    }
}
