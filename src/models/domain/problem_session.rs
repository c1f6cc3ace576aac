use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated problem instance plus its correct answer.
///
/// Immutable after creation; `correct_answer` is the sole ground truth for
/// grading every later submission against this session.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProblemSession {
    pub id: String,
    pub problem_text: String,
    pub correct_answer: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProblemSession {
    pub fn new(problem_text: &str, correct_answer: f64) -> Self {
        ProblemSession {
            id: Uuid::new_v4().to_string(),
            problem_text: problem_text.to_string(),
            correct_answer,
            created_at: Some(Utc::now()),
        }
    }

    pub fn label(&self) -> ProblemLabel {
        ProblemLabel::parse(&self.problem_text)
    }
}

/// Output shape the generation provider is asked for, and the payload the
/// client receives for a freshly created session.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeneratedProblem {
    pub problem_text: String,
    pub final_answer: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProblemType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Mixed,
    /// Only produced when parsing legacy stored text lacking a type segment.
    Unknown,
}

impl ProblemType {
    /// Parses a type segment. Unlike [`ProblemLabel::parse`], unrecognized
    /// values yield `None` so request validation can reject them.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ADDITION" => Some(ProblemType::Addition),
            "SUBTRACTION" => Some(ProblemType::Subtraction),
            "MULTIPLICATION" => Some(ProblemType::Multiplication),
            "DIVISION" => Some(ProblemType::Division),
            "MIXED" => Some(ProblemType::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemType::Addition => write!(f, "ADDITION"),
            ProblemType::Subtraction => write!(f, "SUBTRACTION"),
            ProblemType::Multiplication => write!(f, "MULTIPLICATION"),
            ProblemType::Division => write!(f, "DIVISION"),
            ProblemType::Mixed => write!(f, "MIXED"),
            ProblemType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Structured view of the `"<DIFFICULTY> | <TYPE> | <plain text>"` prefix
/// encoding used in the stored `problem_text` column.
///
/// Older rows carry the two-field form `"<DIFFICULTY> | <plain text>"`; those
/// parse with `prob_type` = `Unknown`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemLabel {
    pub difficulty: Option<Difficulty>,
    pub prob_type: ProblemType,
    pub text: String,
}

impl ProblemLabel {
    pub fn encode(difficulty: Difficulty, prob_type: ProblemType, text: &str) -> String {
        format!("{} | {} | {}", difficulty, prob_type, text.trim())
    }

    pub fn parse(problem_text: &str) -> Self {
        let parts: Vec<&str> = problem_text.splitn(3, '|').collect();

        match parts.as_slice() {
            [diff, type_seg, text] => {
                if let Some(prob_type) = ProblemType::parse(type_seg) {
                    ProblemLabel {
                        difficulty: Difficulty::parse(diff),
                        prob_type,
                        text: text.trim().to_string(),
                    }
                } else {
                    // Middle segment is not a type tag, so the pipe belongs
                    // to the problem text itself. Legacy two-field form.
                    let rest = problem_text
                        .splitn(2, '|')
                        .nth(1)
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    ProblemLabel {
                        difficulty: Difficulty::parse(diff),
                        prob_type: ProblemType::Unknown,
                        text: rest,
                    }
                }
            }
            [diff, text] => ProblemLabel {
                difficulty: Difficulty::parse(diff),
                prob_type: ProblemType::Unknown,
                text: text.trim().to_string(),
            },
            _ => ProblemLabel {
                difficulty: None,
                prob_type: ProblemType::Unknown,
                text: problem_text.trim().to_string(),
            },
        }
    }
}
