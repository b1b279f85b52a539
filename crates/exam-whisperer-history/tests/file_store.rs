use exam_whisperer_history::{FileHistoryStore, HistoryStore};
use exam_whisperer_protocol::{QuizAttempt, SessionRecord};
use exam_whisperer_test_utils::LogCapture;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn attempt() -> QuizAttempt {
    QuizAttempt {
        quiz_question: "Who painted the Mona Lisa?".to_string(),
        options: vec![
            "Vincent van Gogh".to_string(),
            "Pablo Picasso".to_string(),
            "Leonardo da Vinci".to_string(),
            "Claude Monet".to_string(),
        ],
        selected_option: "Leonardo da Vinci".to_string(),
        correct_answer: "Leonardo da Vinci".to_string(),
        is_correct: true,
    }
}

#[tokio::test]
async fn appends_are_read_back_in_order() {
    let temp = tempdir().expect("tempdir");
    let store = FileHistoryStore::new(temp.path().join("history.json"));

    let first = SessionRecord::new("What is air?", "A mixture of gases.", None);
    let second = SessionRecord::new("Explain Renaissance art.", "It began in Italy.", Some(attempt()));
    store.append(first.clone()).await.expect("append first");
    store.append(second.clone()).await.expect("append second");

    let records = store.read_all().await.expect("read");
    assert_eq!(records, vec![first, second]);
}

#[tokio::test]
async fn record_assigns_non_decreasing_timestamps() {
    let temp = tempdir().expect("tempdir");
    let store = FileHistoryStore::new(temp.path().join("history.json"));

    for idx in 0..5 {
        store
            .record(&format!("Q{idx}"), &format!("A{idx}"), None)
            .await
            .expect("record");
    }

    let records = store.read_all().await.expect("read");
    assert_eq!(records.len(), 5);
    assert!(records.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    assert_eq!(records[4].question, "Q4");
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let temp = tempdir().expect("tempdir");
    let store = FileHistoryStore::new(temp.path().join("absent.json"));
    let capture = LogCapture::start();

    assert_eq!(store.read_all().await.expect("read"), Vec::new());
    assert!(capture.warnings().is_empty());
}

#[tokio::test]
async fn corrupted_file_reads_as_empty_with_one_warning() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    fs::write(&path, "{not json").expect("write");
    let store = FileHistoryStore::new(&path);
    let capture = LogCapture::start();

    assert_eq!(store.read_all().await.expect("read"), Vec::new());
    let warnings = capture.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("corrupted or empty"));
}

#[tokio::test]
async fn empty_file_reads_as_empty_with_one_warning() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    fs::write(&path, "").expect("write");
    let store = FileHistoryStore::new(&path);
    let capture = LogCapture::start();

    assert_eq!(store.read_all().await.expect("read"), Vec::new());
    assert_eq!(capture.warnings().len(), 1);
}

#[tokio::test]
async fn append_to_corrupted_file_starts_a_fresh_log() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    fs::write(&path, "garbage").expect("write");
    let store = FileHistoryStore::new(&path);

    let record = SessionRecord::new("Q", "A", None);
    store.append(record.clone()).await.expect("append");
    assert_eq!(store.read_all().await.expect("read"), vec![record]);
}

#[tokio::test]
async fn undecodable_entries_survive_a_later_append() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    fs::write(
        &path,
        r#"[
    {
        "timestamp": "2024-05-01T10:15:30",
        "question": "Q1",
        "answer": "A1",
        "quiz_attempt": {}
    },
    {
        "timestamp": "2024-05-01T10:16:30",
        "question": "Q2",
        "answer": "A2",
        "quiz_attempt": {}
    },
    {
        "timestamp": "2024-05-01T10:17:30",
        "question": "Q3",
        "answer": "A3",
        "quiz_attempt": {
            "quiz_question": "Who painted the Mona Lisa?",
            "options": ["a", "b", "c", "d"],
            "selected_option": "a",
            "correct_answer": "b"
        }
    }
]"#,
    )
    .expect("write");
    let store = FileHistoryStore::new(&path);
    let capture = LogCapture::start();

    let before = store.read_all().await.expect("read");
    let questions: Vec<_> = before.iter().map(|r| r.question.as_str()).collect();
    assert_eq!(questions, vec!["Q1", "Q2"]);
    let warnings = capture.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("index=2"));

    store.record("Q4", "A4", None).await.expect("record");

    let after = store.read_all().await.expect("read");
    let questions: Vec<_> = after.iter().map(|r| r.question.as_str()).collect();
    assert_eq!(questions, vec!["Q1", "Q2", "Q4"]);
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read file")).expect("json");
    assert_eq!(raw.as_array().map(Vec::len), Some(4));
    assert_eq!(raw[2]["question"], "Q3");
}

#[tokio::test]
async fn clear_removes_everything() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    let store = FileHistoryStore::new(&path);
    store.record("Q", "A", None).await.expect("record");

    assert!(store.clear().await.expect("clear"));
    assert!(!path.exists());
    assert_eq!(store.read_all().await.expect("read"), Vec::new());
    assert!(!store.clear().await.expect("clear again"));
}

#[tokio::test]
async fn reads_files_written_by_the_legacy_tracker() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("history.json");
    fs::write(
        &path,
        r#"[
    {
        "timestamp": "2024-05-01T10:15:30.123456",
        "question": "What is air?",
        "answer": "A mixture of gases.",
        "quiz_attempt": {}
    }
]"#,
    )
    .expect("write");
    let store = FileHistoryStore::new(&path);

    let records = store.read_all().await.expect("read");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quiz_attempt, None);
    assert_eq!(
        records[0].timestamp.to_rfc3339(),
        "2024-05-01T10:15:30.123456+00:00"
    );
}

#[test]
fn concurrent_records_are_not_lost() {
    let temp = tempdir().expect("tempdir");
    let store = std::sync::Arc::new(FileHistoryStore::new(temp.path().join("history.json")));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .build()
        .expect("runtime");

    runtime.block_on(async {
        let mut tasks = Vec::new();
        for idx in 0..16 {
            let store = std::sync::Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store
                    .record(&format!("Q{idx}"), "A", None)
                    .await
                    .expect("record");
            }));
        }
        for task in tasks {
            task.await.expect("join");
        }
    });

    let records = runtime
        .block_on(store.read_all())
        .expect("read");
    assert_eq!(records.len(), 16);
}
