//! JSON envelope shared by every API response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::crawler::LyricsError;
use crate::lyrics::KeywordsError;

/// `{"data": .., "error": ..}`, exactly one of the two is set.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data: Some(data),
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    UnknownError,
    InternalError,
    InvalidPayload,
    ArtistNotFound,
}

impl ApiError {
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::UnknownError => "unknown_error",
            ApiError::InternalError => "internal_error",
            ApiError::InvalidPayload => "invalid_payload",
            ApiError::ArtistNotFound => "artist_not_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownError | ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidPayload => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ArtistNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            data: None,
            error: Some(self.name()),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<LyricsError> for ApiError {
    fn from(err: LyricsError) -> Self {
        match err {
            LyricsError::ArtistNotFound(_) => ApiError::ArtistNotFound,
            LyricsError::Upstream(_) | LyricsError::SongFetch { .. } => {
                error!("Error serving lyrics request: {}", err);
                ApiError::InternalError
            }
            // The site answered with something that is neither a failure nor usable.
            other => {
                error!("Unexpected lyrics site content: {}", other);
                ApiError::UnknownError
            }
        }
    }
}

impl From<KeywordsError> for ApiError {
    fn from(_: KeywordsError) -> Self {
        ApiError::InvalidPayload
    }
}
