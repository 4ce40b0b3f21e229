use thiserror::Error;

/// Failures from a completion gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} must be set to call the completion gateway")]
    MissingApiKey(String),

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion gateway returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("completion gateway returned no text")]
    EmptyCompletion,

    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_code_and_message() {
        let err = GatewayError::Status {
            status: 529,
            message: "overloaded".into(),
        };
        assert_eq!(
            err.to_string(),
            "completion gateway returned 529: overloaded"
        );
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = GatewayError::MissingApiKey("OUTFITTER_ANTHROPIC_API_KEY".into());
        assert!(err.to_string().contains("OUTFITTER_ANTHROPIC_API_KEY"));
    }
}
