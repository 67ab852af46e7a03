use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrptError {
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Wait for rate gate admission was interrupted")]
    Interrupted,

    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    #[error("Remote endpoint rejected the document: {status} - {body}")]
    RemoteRejection { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
}

impl CrptError {
    pub fn invalid_configuration(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status carried by a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } | Self::ConfigParse { .. } => {
                "Check request_limit, time_unit and endpoint in the configuration"
            }
            Self::InvalidInput { .. } => "Provide a non-empty signature and a well-formed document",
            Self::Interrupted => "The submission was cancelled before admission; submit again if needed",
            Self::TransportFailure(_) => "Check network connectivity and the endpoint URL",
            Self::RemoteRejection { status, .. } if *status >= 500 => {
                "The remote service failed; try again later"
            }
            Self::RemoteRejection { .. } => "Inspect the response body and fix the document or signature",
            Self::Serialization(_) => "The document could not be encoded as JSON",
            Self::Io(_) => "Check that the input files exist and are readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CrptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_rejection_status() {
        let err = CrptError::RemoteRejection {
            status: 503,
            body: "service unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Remote endpoint rejected the document: 503 - service unavailable"
        );
        assert_eq!(err.recovery_suggestion(), "The remote service failed; try again later");
    }

    #[test]
    fn test_non_rejection_has_no_status() {
        let err = CrptError::invalid_configuration("request_limit", "must be positive");
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Invalid configuration for request_limit: must be positive"
        );
    }
}
