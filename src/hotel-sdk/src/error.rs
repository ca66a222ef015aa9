use hotel_api::ValidationError;

/// Errors from the hotel SDK
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },
    /// Login was rejected
    #[error("Incorrect email or password")]
    InvalidCredentials,
    /// JSON deserialization error
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// The configured base URL cannot carry request paths
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    /// A form failed its presence checks; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SdkError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::InvalidCredentials => Some(401),
            SdkError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the stored token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
