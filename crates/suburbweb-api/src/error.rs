//! Error types for suburbweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use suburbweb_core::{CoreError, ErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => status_for(err.code()),
        }
    }
}

/// HTTP status for a core error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::UnknownEndpoint | ErrorCode::InvalidSuburb => StatusCode::BAD_REQUEST,
        ErrorCode::EmptyResult => StatusCode::NOT_FOUND,
        ErrorCode::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::Transport | ErrorCode::UpstreamStatus | ErrorCode::MalformedResponse => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Core(err) => err.to_details(),
        };
        (status, Json(details)).into_response()
    }
}
