//! API request and response types.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::game::{GuessOutcome, InitDescriptor, Verdict};

/// Query string of `GET /init`.
#[derive(Debug, Clone, Deserialize)]
pub struct InitParams {
    /// Label matching `[A-Z]{2,4}`.
    pub quad: String,
}

/// Query string of `GET /try`.
#[derive(Debug, Clone, Deserialize)]
pub struct TryParams {
    /// Token returned by `/init`.
    pub token: String,
    /// Candidate number. Range is checked by the game, not the extractor.
    pub guess: i64,
}

/// XML body returned by `GET /init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResponse {
    pub quad: String,
    pub token: String,
    pub valid_for_seconds: u64,
}

impl InitResponse {
    /// Render the document.
    ///
    /// Quad is `[A-Z]` and the token is hex, so neither needs escaping.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <init>\n  \
             <quad>{}</quad>\n  \
             <token>{}</token>\n  \
             <validForSeconds>{}</validForSeconds>\n\
             </init>\n",
            self.quad, self.token, self.valid_for_seconds
        )
    }
}

impl From<InitDescriptor> for InitResponse {
    fn from(init: InitDescriptor) -> Self {
        Self {
            quad: init.quad.to_string(),
            token: init.token.to_string(),
            valid_for_seconds: init.valid_for_seconds,
        }
    }
}

impl IntoResponse for InitResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.to_xml()).into_response()
    }
}

/// JSON body returned by `GET /try`.
#[derive(Debug, Clone, Serialize)]
pub struct GuessResponse {
    pub token: String,
    pub guess: u32,
    pub result: Verdict,
    /// Only set when the number was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<GuessOutcome> for GuessResponse {
    fn from(outcome: GuessOutcome) -> Self {
        Self {
            message: outcome.verdict.message(),
            token: outcome.token,
            guess: outcome.guess,
            result: outcome.verdict,
        }
    }
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "UNKNOWN_OR_EXPIRED_TOKEN").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_or_expired_token() -> Self {
        Self::new("UNKNOWN_OR_EXPIRED_TOKEN", "Unknown or expired token")
    }

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new("INVALID_INPUT", "Invalid request parameters").with_details(details)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
