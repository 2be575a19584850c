use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use storage::services::standings::StandingsError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Standings(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl WebError {
    /// Client-facing message. Internal failures are logged and masked.
    fn message(&self) -> String {
        match self {
            Self::Storage(StorageError::NotFound) => "Resource not found".to_string(),
            Self::Storage(StorageError::ConstraintViolation(msg)) => msg.clone(),
            Self::Storage(StorageError::Standings(e)) => e.to_string(),
            Self::Storage(e) => {
                tracing::error!(error = ?e, "request failed with a storage error");
                "An internal error occurred".to_string()
            }
            Self::Validation(_) => "Validation failed".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
        }
    }
}

fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for e in field_errors {
            let reason = match &e.message {
                Some(message) => message.to_string(),
                None => e.code.to_string(),
            };
            details.push(format!("{field}: {reason}"));
        }
    }
    // field_errors() is a HashMap; keep output stable
    details.sort();
    details
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Validation(errors) => json!({
                "error": self.message(),
                "details": validation_details(errors),
            }),
            _ => json!({ "error": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<StandingsError> for WebError {
    fn from(error: StandingsError) -> Self {
        Self::Storage(StorageError::Standings(error))
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::from(StorageError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(StorageError::ConstraintViolation("in use".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::from(StandingsError::InvalidMonthFilter("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(StorageError::Database(sqlx::Error::PoolTimedOut)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(WebError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = WebError::from(StorageError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.message(), "An internal error occurred");

        let err = WebError::from(StorageError::ConstraintViolation("player is in a team".into()));
        assert_eq!(err.message(), "player is in a team");
    }

    #[test]
    fn test_validation_details_name_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name", validator::ValidationError::new("length"));
        assert_eq!(validation_details(&errors), vec!["name: length".to_string()]);
    }
}
