use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use exam_whisperer_history::HistoryError;
use exam_whisperer_llm::ChatError;
use exam_whisperer_protocol::{ErrorPayload, QuizAttemptError};
use log::{error, warn};
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// Failures while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address: {0}")]
    InvalidAddress(#[from] AddrParseError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped with an error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("failed to build provider client: {0}")]
    Provider(#[from] ChatError),
}

/// Error response carrying an [`ErrorPayload`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    payload: ErrorPayload,
}

impl ApiError {
    pub fn new(status: StatusCode, payload: ErrorPayload) -> Self {
        Self { status, payload }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        error!("history store failure: {err}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorPayload::new(format!("history store failure: {err}")),
        )
    }
}

impl From<QuizAttemptError> for ApiError {
    fn from(err: QuizAttemptError) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorPayload::new(err.to_string()),
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let message = rejection.body_text();
        warn!("rejected request body (status={}): {message}", status.as_u16());
        Self::new(status, ErrorPayload::new(message))
    }
}

/// JSON body extractor whose rejections use the [`ErrorPayload`] shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}
