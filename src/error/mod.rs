//! Error Handling Module
//!
//! Every failure surfaced by this crate is a [`BitgoError`]. The taxonomy
//! separates caller-recoverable input problems (`MissingParameter`,
//! `InvalidRequest`) from builder-declaration defects (`Configuration`)
//! and from transport/server failures (`Http`, `Api`), which propagate
//! unchanged in meaning.

use serde_json::Value;
use thiserror::Error;

/// Unified error type for the BitGo client.
#[derive(Error, Debug)]
pub enum BitgoError {
    /// Required parameters (or every alternative in a swap group) are
    /// absent from a request builder. The message lists each unmet
    /// requirement; supplying the missing data and retrying recovers.
    #[error("{0}")]
    MissingParameter(String),

    /// A supplied value is syntactically or semantically invalid: a bad
    /// callback URL, an unknown webhook type, a malformed recipient.
    /// Raised at the point of assignment, not deferred to submission.
    #[error("{0}")]
    InvalidRequest(String),

    /// A request builder declared a parameter it cannot read or write.
    /// This is a defect in the builder's own declarations and is never
    /// reachable from end-user input.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The BitGo server answered with a non-success status. The decoded
    /// response body, when present, is preserved for inspection.
    #[error("BitGo API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// Transport-level failure from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BitgoError {
    /// Build the canonical missing-parameter failure from an ordered list
    /// of unmet requirement descriptions.
    pub fn missing_parameters<I, S>(requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = requirements
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::MissingParameter(format!("The following parameters are required: {list}"))
    }

    /// A declared parameter has no matching accessor on its builder.
    pub fn unknown_parameter(builder: &str, name: &str) -> Self {
        Self::Configuration(format!(
            "the '{name}' parameter is not an accessible field on {builder}"
        ))
    }

    /// Non-success response helper.
    pub fn api_error(status: u16, message: impl Into<String>, body: Option<Value>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            body,
        }
    }

    /// Whether the caller can recover by correcting its input and
    /// retrying. Configuration faults and transport failures are not
    /// input problems.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_) | Self::InvalidRequest(_) | Self::Api { .. }
        )
    }

    /// HTTP status of a server rejection, when this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_joins_with_commas() {
        let err = BitgoError::missing_parameters(["walletId", "[prv or walletPassphrase & key]"]);
        assert_eq!(
            err.to_string(),
            "The following parameters are required: walletId, [prv or walletPassphrase & key]"
        );
    }

    #[test]
    fn recoverability_split() {
        assert!(BitgoError::InvalidRequest("bad url".into()).is_recoverable());
        assert!(BitgoError::api_error(403, "forbidden", None).is_recoverable());
        assert!(!BitgoError::unknown_parameter("AddWebhook", "ghost").is_recoverable());
    }

    #[test]
    fn api_error_exposes_status() {
        let err = BitgoError::api_error(404, "not found", None);
        assert_eq!(err.status(), Some(404));
        assert!(BitgoError::MissingParameter("x".into()).status().is_none());
    }
}
