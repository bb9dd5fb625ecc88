// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use savevault_tags::TagsError;
use serde::Serialize;
use tracing::error;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Tag errors on their way out of an HTTP handler
#[derive(Debug)]
pub struct ApiError(pub TagsError);

impl From<TagsError> for ApiError {
    fn from(err: TagsError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if !self.0.is_validation() {
            error!("Tag request failed to persist: {}", self.0);
        }

        let status = match &self.0 {
            TagsError::EmptyName | TagsError::InvalidColor(_) | TagsError::InvalidTarget(_) => {
                StatusCode::BAD_REQUEST
            }
            TagsError::DuplicateTag(_) => StatusCode::CONFLICT,
            TagsError::TagNotFound(_) => StatusCode::NOT_FOUND,
            TagsError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, ResponseJson(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}
