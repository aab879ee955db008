use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum AppError {
    /// Malformed input. The operation is rejected, state unchanged.
    #[display(fmt = "{}", message)]
    Validation { message: String },

    /// Unknown employee / request / adjustment id. No mutation.
    #[display(fmt = "{}", message)]
    NotFound { message: String },

    /// Acting on a request that is no longer pending.
    #[display(fmt = "{}", message)]
    Conflict { message: String },

    #[display(fmt = "Internal Server Error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict { message: message.into() }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(status).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        assert_eq!(AppError::validation("bad date").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("no such employee").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("already processed").status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_is_the_display_text() {
        assert_eq!(AppError::conflict("already processed").to_string(), "already processed");
    }
}
