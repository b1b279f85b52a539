use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use exam_whisperer_protocol::{
    AskRequest, AskResponse, ClearHistoryResponse, LogQuizAttemptRequest, MessageResponse,
    QuizOutcome, QuizRequest, SessionRecord,
};
use log::{debug, info};
use serde_json::json;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/history", get(history_handler).delete(clear_history_handler))
        .route("/ask_ai", post(ask_handler))
        .route("/generate_quiz", post(quiz_handler))
        .route("/log_quiz_attempt", post(log_quiz_attempt_handler))
        .with_state(state)
}

async fn index_handler() -> impl IntoResponse {
    Html(include_str!("assets/index.html"))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn history_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
    let records = state.list_history().await?;
    debug!("history served (records={})", records.len());
    Ok(Json(records))
}

async fn clear_history_handler(
    State(state): State<AppState>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let cleared = state.clear_history().await?;
    let message = if cleared {
        "All sessions cleared."
    } else {
        "No history file found to clear."
    };
    Ok(Json(ClearHistoryResponse {
        message: message.to_string(),
        cleared,
    }))
}

async fn ask_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answer = state.answer_question(&request.question).await;
    state.log_qa(&request.question, &answer).await?;
    info!("question answered (question_chars={})", request.question.len());
    Ok(Json(AskResponse { answer }))
}

async fn quiz_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> Json<QuizOutcome> {
    Json(state.generate_quiz(&request.topic_or_answer).await)
}

async fn log_quiz_attempt_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LogQuizAttemptRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .log_quiz_attempt(&request.question, &request.answer, request.quiz_attempt)
        .await?;
    Ok(Json(MessageResponse::new("Quiz attempt logged successfully.")))
}
