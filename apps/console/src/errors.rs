use thiserror::Error;

/// Fallback reason shown when the server gives no usable explanation.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server.";

/// Every way a controller round-trip can fail.
///
/// Controllers never let these escape their handler; they are converted to
/// a visible message with [`ConsoleError::user_message`].
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-HTTP transports report their failures as plain text.
    #[error("{0}")]
    Transport(String),

    #[error("server returned status {status}")]
    Server { status: u16, reason: Option<String> },

    #[error("response is missing the expected payload")]
    MissingPayload { reason: Option<String> },

    #[error("response body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ConsoleError {
    /// The message a user sees for this failure, always prefixed with `Error:`.
    pub fn user_message(&self) -> String {
        let reason = match self {
            ConsoleError::Http(e) => e.to_string(),
            ConsoleError::Transport(msg) => msg.clone(),
            ConsoleError::Server { reason, .. } | ConsoleError::MissingPayload { reason } => reason
                .clone()
                .unwrap_or_else(|| UNEXPECTED_RESPONSE.to_string()),
            ConsoleError::Malformed(_) => UNEXPECTED_RESPONSE.to_string(),
        };
        format!("Error: {reason}")
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ConsoleError::Http(_) | ConsoleError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reason_is_passed_through() {
        let err = ConsoleError::Server {
            status: 500,
            reason: Some("model unavailable".to_string()),
        };
        assert_eq!(err.user_message(), "Error: model unavailable");
    }

    #[test]
    fn test_missing_reason_falls_back_to_generic_text() {
        let err = ConsoleError::MissingPayload { reason: None };
        assert_eq!(
            err.user_message(),
            "Error: Unexpected response from the server."
        );
    }

    #[test]
    fn test_malformed_body_uses_generic_text() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ConsoleError::from(parse_err);
        assert_eq!(
            err.user_message(),
            "Error: Unexpected response from the server."
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_message_is_shown() {
        let err = ConsoleError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "Error: connection refused");
        assert!(err.is_transport());
    }
}
