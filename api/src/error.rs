use crate::{
    response::{CommonResponse, ErrorResponse},
    schema::SchemaResolutionError,
    validate::ValidationError,
};

/// Everything a call into the binding can fail with.
///
/// Variants are ordered from "never left the process" to "the server said no".
/// The core never retries or swallows any of them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    SchemaResolution(#[from] SchemaResolutionError),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Application(#[from] ErrorResponse),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// The server's `ok: false` envelope, also when it came with a non-2xx status.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        match self {
            Error::Application(response) => Some(response.clone()),
            Error::HttpStatus { body, .. } => {
                serde_json::from_str::<CommonResponse<serde_json::Value>>(body)
                    .ok()?
                    .into_result()
                    .err()
            }
            _ => None,
        }
    }

    /// Server-side retry hint, present only on flood-control rejections.
    pub fn retry_after(&self) -> Option<i64> {
        self.error_response()?.retry_after()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
