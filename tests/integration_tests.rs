use mathwords_server::models::domain::{ProblemSession, Submission};

#[actix_web::test]
async fn test_session_serialization_round_trip() {
    let session = ProblemSession::new("MEDIUM | SUBTRACTION | Tom spends 3 of his 10 coins.", 7.0);

    let json_str = serde_json::to_string(&session).unwrap();
    let deserialized: ProblemSession = serde_json::from_str(&json_str).unwrap();

    assert_eq!(session, deserialized);
}

#[cfg(test)]
mod sync_tests {
    use super::*;

    #[test]
    fn test_submission_carries_feedback_text() {
        let submission = Submission::new("s-1", 7.0, true, "Great subtraction!");

        let json_str = serde_json::to_string(&submission).unwrap();
        let deserialized: Submission = serde_json::from_str(&json_str).unwrap();

        assert_eq!(deserialized.feedback_text, "Great subtraction!");
        assert_eq!(submission, deserialized);
    }
}
