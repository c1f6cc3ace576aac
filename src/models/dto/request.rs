use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, ProblemType};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProblemRequest {
    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,

    #[validate(length(min = 1, max = 30))]
    pub prob_type: String,
}

impl GenerateProblemRequest {
    /// Resolves the raw wire strings into domain enums. Unrecognized values
    /// are a 400; `UNKNOWN` is never accepted from a client.
    pub fn resolve(&self) -> AppResult<(Difficulty, ProblemType)> {
        let difficulty = Difficulty::parse(&self.difficulty).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown difficulty '{}'", self.difficulty))
        })?;
        let prob_type = ProblemType::parse(&self.prob_type).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown problem type '{}'", self.prob_type))
        })?;
        Ok((difficulty, prob_type))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1))]
    pub session_id: String,

    #[validate(length(min = 1, max = 100))]
    pub user_answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn generate_request_resolves_known_values() {
        let request = GenerateProblemRequest {
            difficulty: "hard".to_string(),
            prob_type: "division".to_string(),
        };
        assert!(request.validate().is_ok());

        let (difficulty, prob_type) = request.resolve().unwrap();
        assert_eq!(difficulty, Difficulty::Hard);
        assert_eq!(prob_type, ProblemType::Division);
    }

    #[test]
    fn generate_request_rejects_unknown_difficulty() {
        let request = GenerateProblemRequest {
            difficulty: "nightmare".to_string(),
            prob_type: "ADDITION".to_string(),
        };
        assert!(request.resolve().is_err());
    }

    #[test]
    fn generate_request_deserializes_camel_case() {
        let request: GenerateProblemRequest =
            serde_json::from_str(r#"{"difficulty":"EASY","probType":"MIXED"}"#).unwrap();
        assert_eq!(request.prob_type, "MIXED");
    }

    #[test]
    fn submit_request_deserializes_camel_case() {
        let request: SubmitAnswerRequest =
            serde_json::from_str(r#"{"sessionId":"abc","userAnswer":"1 1/2"}"#).unwrap();
        assert_eq!(request.session_id, "abc");
        assert_eq!(request.user_answer, "1 1/2");
    }

    #[test]
    fn empty_answer_fails_validation() {
        let request = SubmitAnswerRequest {
            session_id: "abc".to_string(),
            user_answer: "".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
