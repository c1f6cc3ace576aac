use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::prompts::{
    FALLBACK_FEEDBACK_CORRECT, FALLBACK_FEEDBACK_NEAR, FALLBACK_FEEDBACK_WRONG, FALLBACK_NOTE,
    FALLBACK_PROBLEMS,
};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    Band, Difficulty, GeneratedProblem, ProblemLabel, ProblemSession, ProblemType, Submission,
};
use crate::models::dto::response::{
    DifficultyScore, GenerateProblemResponse, HintResponse, ScoreResponse, SolutionResponse,
    SubmitAnswerResponse,
};
use crate::repositories::{SessionRepository, SubmissionRepository};
use crate::services::answer::parse_answer;
use crate::services::generation::GenerationService;
use crate::services::grading::{classify, round2};

pub struct ProblemService {
    sessions: Arc<dyn SessionRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    generation: Arc<GenerationService>,
}

impl ProblemService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        generation: Arc<GenerationService>,
    ) -> Self {
        Self {
            sessions,
            submissions,
            generation,
        }
    }

    /// Generates a problem, persists it as a new session, and returns the
    /// session payload. Provider exhaustion degrades to a canned fallback
    /// problem with a `note`; store errors propagate.
    pub async fn generate(
        &self,
        difficulty: Difficulty,
        prob_type: ProblemType,
    ) -> AppResult<GenerateProblemResponse> {
        let last_problem = self
            .sessions
            .find_latest()
            .await?
            .map(|s| s.label().text);

        let (problem, note) = match self
            .generation
            .generate_problem(difficulty, prob_type, last_problem.as_deref())
            .await
        {
            Ok(problem) => (problem, None),
            Err(AppError::ProviderError(e)) => {
                log::warn!("problem generation fell back to the built-in set: {e}");
                (fallback_problem(), Some(FALLBACK_NOTE.to_string()))
            }
            Err(e) => return Err(e),
        };

        let stored_text = ProblemLabel::encode(difficulty, prob_type, &problem.problem_text);
        let session = self
            .sessions
            .create(ProblemSession::new(&stored_text, problem.final_answer))
            .await?;

        Ok(GenerateProblemResponse {
            session_id: session.id,
            difficulty,
            prob_type: prob_type.to_string(),
            problem,
            note,
        })
    }

    /// Grades one answer against a session and persists the submission.
    ///
    /// `is_correct` is decided on the unrounded parsed value; the stored
    /// `user_answer` is rounded to 2 decimals. Feedback degrades to a
    /// templated message when the provider is exhausted.
    pub async fn submit(
        &self,
        session_id: &str,
        user_answer: &str,
    ) -> AppResult<SubmitAnswerResponse> {
        let session = self.get_session(session_id).await?;

        let parsed = parse_answer(user_answer).ok_or_else(|| {
            AppError::ValidationError(format!("Could not parse answer '{user_answer}'"))
        })?;

        let band = classify(session.correct_answer, parsed);
        let is_correct = band == Band::Correct;

        let feedback = match self
            .generation
            .feedback(&session.label().text, session.correct_answer, parsed, band)
            .await
        {
            Ok(feedback) => feedback,
            Err(AppError::ProviderError(e)) => {
                log::warn!("feedback generation fell back to a canned message: {e}");
                fallback_feedback(band).to_string()
            }
            Err(e) => return Err(e),
        };

        self.submissions
            .create(Submission::new(
                &session.id,
                round2(parsed),
                is_correct,
                &feedback,
            ))
            .await?;

        Ok(SubmitAnswerResponse {
            is_correct,
            band,
            feedback,
            normalized_user_answer: round2(parsed),
        })
    }

    /// No canned hint exists, so provider exhaustion surfaces to the client.
    pub async fn hint(&self, session_id: &str) -> AppResult<HintResponse> {
        let session = self.get_session(session_id).await?;
        let hint = self.generation.hint(&session.label().text).await?;
        Ok(HintResponse { hint })
    }

    pub async fn solution(&self, session_id: &str) -> AppResult<SolutionResponse> {
        let session = self.get_session(session_id).await?;
        let solution = self
            .generation
            .solution(&session.label().text, session.correct_answer)
            .await?;
        Ok(SolutionResponse { solution })
    }

    /// First-submission-only results per session, grouped by the difficulty
    /// parsed out of the stored `problem_text` prefix.
    pub async fn score(&self) -> AppResult<ScoreResponse> {
        let sessions = self.sessions.list_all().await?;
        let submissions = self.submissions.list_all().await?;

        let mut first_by_session: HashMap<&str, &Submission> = HashMap::new();
        for submission in &submissions {
            first_by_session
                .entry(submission.session_id.as_str())
                .and_modify(|current| {
                    if submission.created_at < current.created_at {
                        *current = submission;
                    }
                })
                .or_insert(submission);
        }

        let mut buckets: HashMap<Difficulty, (u32, u32)> = HashMap::new();
        for session in &sessions {
            let Some(first) = first_by_session.get(session.id.as_str()) else {
                continue;
            };
            let Some(difficulty) = session.label().difficulty else {
                log::warn!(
                    "session '{}' has no parseable difficulty prefix, skipping in score",
                    session.id
                );
                continue;
            };
            let bucket = buckets.entry(difficulty).or_insert((0, 0));
            bucket.0 += 1;
            if first.is_correct {
                bucket.1 += 1;
            }
        }

        let scores = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .filter_map(|difficulty| {
                buckets.get(&difficulty).map(|(attempted, correct)| DifficultyScore {
                    difficulty,
                    attempted: *attempted,
                    correct: *correct,
                })
            })
            .collect();

        Ok(ScoreResponse { scores })
    }

    async fn get_session(&self, session_id: &str) -> AppResult<ProblemSession> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{session_id}' not found")))
    }
}

fn fallback_problem() -> GeneratedProblem {
    let idx = uuid::Uuid::new_v4().as_bytes()[0] as usize % FALLBACK_PROBLEMS.len();
    let (text, answer) = FALLBACK_PROBLEMS[idx];
    GeneratedProblem {
        problem_text: text.to_string(),
        final_answer: answer,
    }
}

fn fallback_feedback(band: Band) -> &'static str {
    match band {
        Band::Correct => FALLBACK_FEEDBACK_CORRECT,
        Band::Near => FALLBACK_FEEDBACK_NEAR,
        Band::Wrong => FALLBACK_FEEDBACK_WRONG,
    }
}
