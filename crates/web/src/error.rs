use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("{0}")]
    Core(#[from] cf_dashboard_core::Error),

    #[error("Application state is unavailable")]
    StatePoisoned,

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::Core(cf_dashboard_core::Error::InvalidPageSize) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
