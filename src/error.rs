use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// The provider needs a credential that was not configured
    #[error("{provider} API key is required")]
    MissingCredential { provider: String },

    /// Failed to reach the provider
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("{provider} API error: {status}")]
    StatusError { provider: String, status: u16 },

    /// The provider answered with a body we could not understand
    #[error("Unexpected response payload: {0}")]
    PayloadError(#[from] serde_json::Error),

    /// Unknown provider name in configuration or on the command line
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Unknown meal type name
    #[error("Unknown meal type: {0}")]
    UnknownMealType(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl SearchError {
    pub(crate) fn missing_credential(provider: &str) -> Self {
        SearchError::MissingCredential {
            provider: provider.to_string(),
        }
    }
}
