use std::borrow::Cow;
use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use crate::errors::AppError;

const INTERNAL_ERROR: &str = "❌ Internal server error";

impl AppError {
    /// Status code and client-facing detail for this error.
    pub fn status_and_detail(&self) -> (StatusCode, Cow<'static, str>) {
        let (status, detail) = match self {
            // axum's own message names the missing or mistyped field
            AppError::Body(rejection) => return (rejection.status(), Cow::Owned(rejection.body_text())),
            AppError::InvalidOtp => (StatusCode::BAD_REQUEST, "❌ Invalid OTP"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "❌ User not found"),
            AppError::PhoneNotRegistered(_) => (StatusCode::NOT_FOUND, "User not found"),
            AppError::IncorrectPassword => (StatusCode::UNAUTHORIZED, "❌ Incorrect password"),
            AppError::NotVerified => (StatusCode::FORBIDDEN, "❌ Phone number not verified"),
            AppError::VotingEnded => (StatusCode::FORBIDDEN, "❌ Voting has ended"),
            AppError::AlreadyVoted(_) => (StatusCode::FORBIDDEN, "❌ You have already voted"),
            AppError::Email(_) => (StatusCode::INTERNAL_SERVER_ERROR, "❌ Failed to send OTP"),
            AppError::Store(_) | AppError::Hash(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        };
        (status, Cow::Borrowed(detail))
    }
}

// Client errors carry a readable detail; server errors are logged here and
// collapsed to a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
