use thiserror::Error;

/// Ledger API client errors.
///
/// Transport failures and non-success responses are kept distinct so
/// callers can tell a dead endpoint from a rejected transaction; the
/// response body of an API error is carried verbatim because the ledger
/// returns structured error envelopes.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ledger api error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("invalid response payload: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api_error() {
        let err = NetworkError::Api {
            status: 400,
            body: r#"{"errors":["InsufficientBalance"]}"#.into(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("InsufficientBalance"));
    }

    #[test]
    fn display_invalid_response() {
        let err = NetworkError::InvalidResponse("missing field `ordinal`".into());
        assert!(err.to_string().contains("ordinal"));
    }
}
