//! Shared handler state and the operations the routes are built on.

use crate::error::{ApiError, ServerError};
use exam_whisperer_config::WhispererConfig;
use exam_whisperer_history::{FileHistoryStore, HistoryError, HistoryStore};
use exam_whisperer_llm::{AnswerClient, AnswerProvider, ChatClient, QuizGenerator, QuizProvider};
use exam_whisperer_protocol::{QuizAttempt, QuizOutcome, SessionRecord};
use log::info;
use std::sync::Arc;

/// Services injected into every handler.
#[derive(Clone)]
pub struct AppState {
    history: Arc<dyn HistoryStore>,
    answers: Arc<dyn AnswerProvider>,
    quizzes: Arc<dyn QuizProvider>,
}

impl AppState {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        answers: Arc<dyn AnswerProvider>,
        quizzes: Arc<dyn QuizProvider>,
    ) -> Self {
        Self {
            history,
            answers,
            quizzes,
        }
    }

    /// Wire the file store and provider clients described by `config`.
    pub fn from_config(config: &WhispererConfig) -> Result<Self, ServerError> {
        let chat = ChatClient::from_config(&config.provider)?;
        let answers = AnswerClient::new(chat.clone(), &config.provider);
        let quizzes = QuizGenerator::new(chat, &config.provider);
        info!(
            "application state ready (history={}, model={})",
            config.history.path.display(),
            config.provider.model
        );
        Ok(Self::new(
            Arc::new(FileHistoryStore::new(&config.history.path)),
            Arc::new(answers),
            Arc::new(quizzes),
        ))
    }

    /// Answer a prompt; provider failures come back as answer text.
    pub async fn answer_question(&self, prompt: &str) -> String {
        match self.answers.answer_question(prompt).await {
            Ok(answer) => answer,
            Err(err) => err.into_answer(),
        }
    }

    /// Generate a quiz, or the error payload standing in for one.
    pub async fn generate_quiz(&self, topic_or_answer: &str) -> QuizOutcome {
        match self.quizzes.generate_quiz(topic_or_answer).await {
            Ok(quiz) => QuizOutcome::Quiz(quiz),
            Err(err) => QuizOutcome::Error(err.to_payload()),
        }
    }

    pub async fn log_qa(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<SessionRecord, HistoryError> {
        self.history.record(question, answer, None).await
    }

    /// Validate and log a quiz attempt alongside its question and answer.
    pub async fn log_quiz_attempt(
        &self,
        question: &str,
        answer: &str,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Result<SessionRecord, ApiError> {
        if let Some(attempt) = &quiz_attempt {
            attempt.validate()?;
        }
        Ok(self.history.record(question, answer, quiz_attempt).await?)
    }

    pub async fn list_history(&self) -> Result<Vec<SessionRecord>, HistoryError> {
        self.history.read_all().await
    }

    pub async fn clear_history(&self) -> Result<bool, HistoryError> {
        self.history.clear().await
    }
}
