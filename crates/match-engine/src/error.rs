//! Engine error type

use thiserror::Error;

/// Errors surfaced by the engine to its caller.
///
/// Every variant is a client error: the engine has no transport and never
/// retries internally.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Requested strategy name is not registered.
    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    /// A match, payoff, or registry parameter is out of bounds.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// Request body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}

impl MatchError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        MatchError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Stable tag used in wire error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::UnknownStrategy { .. } => "unknown_strategy",
            MatchError::InvalidParameter { .. } => "invalid_parameter",
            MatchError::MalformedRequest(_) => "malformed_request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = MatchError::UnknownStrategy { name: "Nope".into() };
        assert_eq!(e.to_string(), "unknown strategy: Nope");

        let e = MatchError::invalid("rounds", "must be at least 1, got 0");
        assert_eq!(e.to_string(), "invalid rounds: must be at least 1, got 0");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(MatchError::UnknownStrategy { name: String::new() }.kind(), "unknown_strategy");
        assert_eq!(MatchError::invalid("noise", "x").kind(), "invalid_parameter");

        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(MatchError::from(parse).kind(), "malformed_request");
    }
}
