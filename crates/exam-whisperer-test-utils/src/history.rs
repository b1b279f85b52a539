use async_trait::async_trait;
use chrono::Utc;
use exam_whisperer_history::{HistoryError, HistoryStore};
use exam_whisperer_protocol::{QuizAttempt, SessionRecord};
use parking_lot::Mutex;
use std::io;

/// In-memory history store with the same timestamp clamping as the file store.
#[derive(Debug, Default)]
pub struct StubHistory {
    records: Mutex<Vec<SessionRecord>>,
}

impl StubHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn snapshot(&self) -> Vec<SessionRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl HistoryStore for StubHistory {
    async fn append(&self, record: SessionRecord) -> Result<(), HistoryError> {
        self.records.lock().push(record);
        Ok(())
    }

    async fn record(
        &self,
        question: &str,
        answer: &str,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Result<SessionRecord, HistoryError> {
        let mut records = self.records.lock();
        let now = Utc::now();
        let timestamp = records
            .last()
            .map_or(now, |last| last.timestamp.max(now));
        let record = SessionRecord::at(timestamp, question, answer, quiz_attempt);
        records.push(record.clone());
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<SessionRecord>, HistoryError> {
        Ok(self.snapshot())
    }

    async fn clear(&self) -> Result<bool, HistoryError> {
        let mut records = self.records.lock();
        let had_records = !records.is_empty();
        records.clear();
        Ok(had_records)
    }
}

/// History store whose every operation fails with an I/O error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingHistory;

fn failure() -> HistoryError {
    HistoryError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "history unavailable",
    ))
}

#[async_trait]
impl HistoryStore for FailingHistory {
    async fn append(&self, _record: SessionRecord) -> Result<(), HistoryError> {
        Err(failure())
    }

    async fn record(
        &self,
        _question: &str,
        _answer: &str,
        _quiz_attempt: Option<QuizAttempt>,
    ) -> Result<SessionRecord, HistoryError> {
        Err(failure())
    }

    async fn read_all(&self) -> Result<Vec<SessionRecord>, HistoryError> {
        Err(failure())
    }

    async fn clear(&self) -> Result<bool, HistoryError> {
        Err(failure())
    }
}

#[cfg(test)]
mod tests {
    use super::StubHistory;
    use chrono::{Duration, Utc};
    use exam_whisperer_history::HistoryStore;
    use exam_whisperer_protocol::SessionRecord;

    #[tokio::test]
    async fn record_never_goes_back_in_time() {
        let future = Utc::now() + Duration::hours(1);
        let history = StubHistory::with_records(vec![SessionRecord::at(future, "Q1", "A1", None)]);

        let record = history.record("Q2", "A2", None).await.expect("record");
        assert_eq!(record.timestamp, future);
        assert_eq!(history.snapshot().len(), 2);
    }
}
