use axum::http::StatusCode;
use thiserror::Error;

/// Input rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount is required")]
    MissingAmount,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount is too large for the ledger totals")]
    AmountTooLarge,
    #[error("category is required")]
    EmptyCategory,
    #[error("category '{category}' is not valid for {kind} transactions")]
    UnknownCategory { kind: &'static str, category: String },
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("journal entry must not be empty")]
    EmptyEntry,
    #[error("message must not be empty")]
    EmptyMessage,
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

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = AppError::from(ValidationError::UnknownCategory {
            kind: "expense",
            category: "Зарплата".into(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "category 'Зарплата' is not valid for expense transactions"
        );
    }
}
