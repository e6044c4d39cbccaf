use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown to the user in the error dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Unauthenticated => "Please sign in first.".to_string(),
            Self::NotFound => "That snippet no longer exists.".to_string(),
            Self::RateLimited(msg) => msg.clone(),
            Self::Database(_) => "Could not reach the database. Try again later.".to_string(),
            Self::Auth(_) => "Sign in failed. Try again.".to_string(),
            Self::Config(_) | Self::Internal(_) => {
                "Something went wrong on the server. Try again later.".to_string()
            }
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use server_fn::ServerFnError;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
                AppError::Auth(_) => StatusCode::BAD_GATEWAY,
                AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        pub fn into_server_error(self) -> ServerFnError {
            ServerFnError::new(self.user_message())
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            (
                status,
                Json(ErrorResponse {
                    message: self.user_message(),
                }),
            )
                .into_response()
        }
    }

    impl From<sea_orm::DbErr> for AppError {
        fn from(err: sea_orm::DbErr) -> Self {
            match err {
                sea_orm::DbErr::RecordNotFound(_) => AppError::NotFound,
                other => AppError::Database(other.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_database_details() {
        let err = AppError::Database("connection refused on 10.0.0.3".to_string());
        assert!(!err.user_message().contains("10.0.0.3"));
    }

    #[test]
    fn test_user_message_keeps_validation_text() {
        let err = AppError::InvalidInput("Code cannot be empty".to_string());
        assert_eq!(err.user_message(), "Code cannot be empty");
        assert_eq!(err.to_string(), "Invalid input: Code cannot be empty");
    }
}
