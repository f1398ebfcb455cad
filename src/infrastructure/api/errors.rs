use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`super::ApiClient`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API key configured
    #[error("no API key configured; set AGENT_COMPOSER_API__API_KEY or api.api_key in config.yaml")]
    MissingApiKey,

    /// Invalid or unauthorized API key (HTTP 401/403)
    #[error("{operation}: authentication failed ({status})")]
    Unauthorized {
        operation: &'static str,
        status: StatusCode,
    },

    /// Any other non-success status
    #[error("{operation}: {status}: {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Network or connection error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn from_status(operation: &'static str, status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized { operation, status },
            _ => Self::Status {
                operation,
                status,
                body,
            },
        }
    }

    /// HTTP status of the failed call, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::MissingApiKey | Self::InvalidResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_auth() {
        assert!(matches!(
            ApiError::from_status("get agent metadata", StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status("modify agent", StatusCode::FORBIDDEN, String::new()),
            ApiError::Unauthorized { .. }
        ));

        let err = ApiError::from_status("modify agent", StatusCode::NOT_FOUND, "no such agent".into());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "modify agent: 404 Not Found: no such agent");
    }
}
