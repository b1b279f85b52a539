//! Chat-completion clients used by Exam Whisperer.
//!
//! [`AnswerClient`] turns a question into answer text and [`QuizGenerator`]
//! turns a topic into a validated [`exam_whisperer_protocol::Quiz`]. Both share
//! a [`ChatClient`] that refuses to touch the network without a usable
//! credential.

pub mod answer;
pub mod chat;
pub mod error;
pub mod quiz;

pub use answer::{ANSWER_SYSTEM_PROMPT, AnswerClient, AnswerProvider};
pub use chat::{
    ChatClient, ChatMessage, ChatRequest, ChatRole, ResponseFormat, is_usable_credential,
};
pub use error::{AnswerError, ChatError, QuizError};
pub use quiz::{QUIZ_SYSTEM_PROMPT, QuizGenerator, QuizProvider, parse_quiz, quiz_prompt};
