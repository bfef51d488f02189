use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Caller-facing failure of a roles API call.
///
/// Each variant renders a fixed, human-readable message. The underlying
/// transport or HTTP error is logged by the service and never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid request: please check the submitted data")]
    BadRequest,

    #[error("Unauthorized: please sign in again")]
    Unauthorized,

    #[error("Access denied: you do not have permission to perform this action")]
    Forbidden,

    #[error("Role not found")]
    NotFound,

    #[error("Conflict: a role with this code or name already exists")]
    Conflict,

    #[error("Internal server error: please try again later")]
    ServerError,

    #[error("An unexpected error occurred")]
    Unexpected,

    #[error("Unable to reach the server: check your network connection")]
    Client,
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }
}

/// Failure raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// before any HTTP status was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Raw outcome of a failed call, before it is collapsed into an [`ApiError`].
#[derive(Debug, Error)]
pub(crate) enum CallFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CallFailure {
    pub(crate) fn api_error(&self) -> ApiError {
        match self {
            CallFailure::Transport(_) => ApiError::Client,
            CallFailure::Status { status, .. } => ApiError::from_status(*status),
            CallFailure::Decode(_) => ApiError::Unexpected,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
