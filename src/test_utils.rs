use crate::models::domain::{ProblemSession, Submission};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a session with the current three-field prefix encoding
    pub fn test_session(difficulty: &str, prob_type: &str, answer: f64) -> ProblemSession {
        ProblemSession::new(
            &format!("{difficulty} | {prob_type} | A test word problem."),
            answer,
        )
    }

    /// Creates a session stored in the legacy two-field form
    pub fn legacy_session(difficulty: &str, answer: f64) -> ProblemSession {
        ProblemSession::new(&format!("{difficulty} | A legacy word problem."), answer)
    }

    /// Creates a graded submission against the given session
    pub fn test_submission(session: &ProblemSession, answer: f64, is_correct: bool) -> Submission {
        Submission::new(&session.id, answer, is_correct, "test feedback")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::{Difficulty, ProblemType};

    #[test]
    fn test_fixtures_test_session() {
        let session = test_session("HARD", "DIVISION", 4.0);
        let label = session.label();
        assert_eq!(label.difficulty, Some(Difficulty::Hard));
        assert_eq!(label.prob_type, ProblemType::Division);
        assert_eq!(session.correct_answer, 4.0);
    }

    #[test]
    fn test_fixtures_legacy_session() {
        let session = legacy_session("EASY", 2.0);
        let label = session.label();
        assert_eq!(label.difficulty, Some(Difficulty::Easy));
        assert_eq!(label.prob_type, ProblemType::Unknown);
    }

    #[test]
    fn test_fixtures_test_submission() {
        let session = test_session("EASY", "ADDITION", 5.0);
        let submission = test_submission(&session, 5.0, true);
        assert_eq!(submission.session_id, session.id);
        assert!(submission.is_correct);
    }
}
