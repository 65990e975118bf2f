//! Error types for the keeper registry client

/// Errors that can occur during registry client operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unable to register service with keeper: service information not set")]
    MissingServiceInfo,

    #[error("unsupported registry type: {0}")]
    UnsupportedRegistryType(String),

    #[error("failed to add authentication data: {0}")]
    Auth(String),

    #[error("invalid registry url: {0}")]
    InvalidUrl(String),

    #[error("failed to check the {service_key} service registry status: {source}")]
    RegistrationCheck {
        service_key: String,
        #[source]
        source: Box<RegistryError>,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("failed to encode registration request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{context}: {message}")]
    Registry { context: String, message: String },

    #[error("{0} service is not registered. Might not have started...")]
    NotRegistered(String),

    #[error("{0} service not healthy")]
    NotHealthy(String),
}

impl RegistryError {
    /// True when the registry answered 404 for the requested service
    pub fn is_not_registered(&self) -> bool {
        matches!(self, RegistryError::NotRegistered(_))
    }

    /// True when the service is registered but not reported as up
    pub fn is_not_healthy(&self) -> bool {
        matches!(self, RegistryError::NotHealthy(_))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
