use axum::http::StatusCode;
use thiserror::Error;

/// Failures talking to the fitness API or decoding what it sent back.
#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("fitness service unreachable: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("fitness service answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("missing field `{0}`")]
    MissingField(String),
}

impl FitnessError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Text shown to the person who submitted the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NetworkFailure(_) => {
                "The fitness service could not be reached. Please try again in a moment."
            }
            Self::UnexpectedStatus { .. } => {
                "The fitness service rejected the request. Please try again later."
            }
            Self::MalformedPayload(_) | Self::MissingField(_) => {
                "The fitness service sent back a response we could not read."
            }
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unprocessable(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<FitnessError> for AppError {
    fn from(err: FitnessError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
