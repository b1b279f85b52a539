use async_trait::async_trait;
use exam_whisperer_llm::{AnswerError, AnswerProvider, QuizError, QuizProvider, parse_quiz};
use exam_whisperer_protocol::Quiz;
use parking_lot::Mutex;

/// Answer provider returning a fixed answer, or a missing-credential error.
#[derive(Debug, Default)]
pub struct FixedAnswer {
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FixedAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn missing_credential() -> Self {
        Self::default()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl AnswerProvider for FixedAnswer {
    async fn answer_question(&self, prompt: &str) -> Result<String, AnswerError> {
        self.prompts.lock().push(prompt.to_string());
        self.answer.clone().ok_or(AnswerError::MissingCredential)
    }
}

/// Quiz provider that validates fixed model content on every call.
#[derive(Debug)]
pub struct FixedQuiz {
    content: Option<String>,
    topics: Mutex<Vec<String>>,
}

impl FixedQuiz {
    /// Serve `content` as if the model had returned it.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            topics: Mutex::new(Vec::new()),
        }
    }

    pub fn missing_credential() -> Self {
        Self {
            content: None,
            topics: Mutex::new(Vec::new()),
        }
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().clone()
    }
}

#[async_trait]
impl QuizProvider for FixedQuiz {
    async fn generate_quiz(&self, topic_or_answer: &str) -> Result<Quiz, QuizError> {
        self.topics.lock().push(topic_or_answer.to_string());
        match &self.content {
            Some(content) => parse_quiz(content),
            None => Err(QuizError::MissingCredential),
        }
    }
}

/// The air-composition quiz used throughout the tests, as model content.
pub fn sample_quiz() -> String {
    r#"{"question":"What is the main component of air?","options":["Nitrogen","Oxygen","Carbon Dioxide","Hydrogen"],"answer":"Nitrogen"}"#
        .to_string()
}
