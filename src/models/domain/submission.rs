use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grading outcome bucket for one answer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Correct,
    Near,
    Wrong,
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Correct => write!(f, "correct"),
            Band::Near => write!(f, "near"),
            Band::Wrong => write!(f, "wrong"),
        }
    }
}

/// One graded answer attempt against a session. Append-only; never mutated
/// or deleted.
///
/// `user_answer` is stored rounded to 2 decimals while `is_correct` reflects
/// the tolerance check against the unrounded parsed value. Storage and
/// grading precision intentionally differ.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub session_id: String,
    pub user_answer: f64,
    pub is_correct: bool,
    pub feedback_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(session_id: &str, user_answer: f64, is_correct: bool, feedback_text: &str) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            user_answer,
            is_correct,
            feedback_text: feedback_text.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
