use serde::Serialize;

use crate::models::domain::{Band, Difficulty, GeneratedProblem};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProblemResponse {
    pub session_id: String,
    pub difficulty: Difficulty,
    pub prob_type: String,
    pub problem: GeneratedProblem,
    /// Present only when every candidate model failed and a canned fallback
    /// problem was served instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub is_correct: bool,
    pub band: Band,
    pub feedback: String,
    pub normalized_user_answer: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionResponse {
    pub solution: String,
}

/// First-submission-only results for one difficulty bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DifficultyScore {
    pub difficulty: Difficulty,
    pub attempted: u32,
    pub correct: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub scores: Vec<DifficultyScore>,
}
