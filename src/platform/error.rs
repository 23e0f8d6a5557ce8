use thiserror::Error;

/// Errors returned by calls against the platform API.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Platform request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status. Displays the
    /// platform's own message so it can be surfaced to callers verbatim.
    #[error("{message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Unexpected platform response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PlatformError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Api { status, .. } => Some(*status),
            PlatformError::Http(e) => e.status().map(|s| s.as_u16()),
            PlatformError::Decode(_) => None,
        }
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
