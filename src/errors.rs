use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the persistence layer. These never leave [`crate::storage::Store`];
/// the adapter recovers from both kinds locally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("malformed data under `{key}`: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WellnessError {
    #[error("{0}")]
    Validation(String),

    #[error("routine not found: {0}")]
    RoutineNotFound(String),

    #[error("exercise not found: {0}")]
    ExerciseNotFound(String),

    #[error("no exercise is active")]
    NoActiveExercise,
}

impl WellnessError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<WellnessError> for AppError {
    fn from(err: WellnessError) -> Self {
        match err {
            WellnessError::Validation(_) => Self::bad_request(err.to_string()),
            WellnessError::RoutineNotFound(_) | WellnessError::ExerciseNotFound(_) => {
                Self::not_found(err.to_string())
            }
            WellnessError::NoActiveExercise => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
