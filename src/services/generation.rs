use std::sync::Arc;
use uuid::Uuid;

use crate::constants::prompts::{
    FEEDBACK_SYSTEM_PROMPT, HINT_SYSTEM_PROMPT, PLAIN_RETRY_PREFIX, PROBLEM_SYSTEM_PROMPT,
    SOLUTION_SYSTEM_PROMPT, TOPIC_HINTS,
};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Band, Difficulty, GeneratedProblem, ProblemType};
use crate::services::chat_client::ChatProvider;
use crate::services::json_extract::extract_json_object;

const RAW_PREVIEW_CHARS: usize = 120;

/// Drives the external text-generation provider through an ordered list of
/// candidate models.
///
/// Per call: structured (JSON-mode) attempt first; if extraction or shape
/// validation fails, one plain-mode retry against the same model; if the
/// call itself errors, or the retry is also unusable, advance to the next
/// candidate. The loop is strictly sequential and every retry is bounded.
pub struct GenerationService {
    provider: Arc<dyn ChatProvider>,
    candidate_models: Vec<String>,
}

impl GenerationService {
    pub fn new(provider: Arc<dyn ChatProvider>, candidate_models: Vec<String>) -> Self {
        Self {
            provider,
            candidate_models,
        }
    }

    /// Produces a new problem for the requested difficulty and operation.
    ///
    /// A random nonce token is embedded in the prompt for novelty. When the
    /// generated text exactly matches the previous session's problem, a
    /// different topic hint is chosen and generation is retried once.
    pub async fn generate_problem(
        &self,
        difficulty: Difficulty,
        prob_type: ProblemType,
        last_problem: Option<&str>,
    ) -> AppResult<GeneratedProblem> {
        let nonce = Uuid::new_v4();

        let prompt = problem_prompt(difficulty, prob_type, pick_topic(&nonce, 0), &nonce);
        let problem = self
            .complete(PROBLEM_SYSTEM_PROMPT, &prompt, parse_problem)
            .await?;

        if last_problem == Some(problem.problem_text.as_str()) {
            log::info!("generated problem duplicates the previous session, retrying with a different topic");
            let retry_nonce = Uuid::new_v4();
            let prompt =
                problem_prompt(difficulty, prob_type, pick_topic(&nonce, 1), &retry_nonce);
            return self
                .complete(PROBLEM_SYSTEM_PROMPT, &prompt, parse_problem)
                .await;
        }

        Ok(problem)
    }

    pub async fn feedback(
        &self,
        problem_text: &str,
        correct_answer: f64,
        user_answer: f64,
        band: Band,
    ) -> AppResult<String> {
        let prompt = format!(
            "Problem: {problem_text}\n\
             Correct answer: {correct_answer}\n\
             Student's answer: {user_answer}\n\
             Outcome: {band}\n\n\
             Write feedback for this student as the required JSON object."
        );
        self.complete(FEEDBACK_SYSTEM_PROMPT, &prompt, parse_text_key("feedback"))
            .await
    }

    /// The prompt context deliberately contains only the problem text, never
    /// the stored answer.
    pub async fn hint(&self, problem_text: &str) -> AppResult<String> {
        let prompt = format!(
            "Problem: {problem_text}\n\n\
             Write one hint for this problem as the required JSON object."
        );
        self.complete(HINT_SYSTEM_PROMPT, &prompt, parse_text_key("hint"))
            .await
    }

    pub async fn solution(&self, problem_text: &str, correct_answer: f64) -> AppResult<String> {
        let prompt = format!(
            "Problem: {problem_text}\n\
             Correct answer: {correct_answer}\n\n\
             Write the step-by-step solution as the required JSON object."
        );
        self.complete(SOLUTION_SYSTEM_PROMPT, &prompt, parse_text_key("solution"))
            .await
    }

    async fn complete<T, F>(&self, system_prompt: &str, user_prompt: &str, parse: F) -> AppResult<T>
    where
        F: Fn(&serde_json::Value) -> Option<T>,
    {
        for model in &self.candidate_models {
            let raw = match self
                .provider
                .chat(model, system_prompt, user_prompt, true)
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    // The call itself threw; no point retrying this model.
                    log::warn!("model '{model}' call failed: {e}");
                    continue;
                }
            };
            log::debug!("model '{model}' raw output: {}", preview(&raw));

            if let Some(value) = parse_raw(&raw, &parse) {
                log::debug!("model '{model}' structured attempt succeeded");
                return Ok(value);
            }
            log::warn!("model '{model}' structured output was unusable, retrying in plain mode");

            let retry_prompt = format!("{PLAIN_RETRY_PREFIX}{user_prompt}");
            match self
                .provider
                .chat(model, system_prompt, &retry_prompt, false)
                .await
            {
                Ok(raw) => {
                    log::debug!("model '{model}' retry raw output: {}", preview(&raw));
                    if let Some(value) = parse_raw(&raw, &parse) {
                        log::info!("model '{model}' succeeded on plain-mode retry");
                        return Ok(value);
                    }
                    log::warn!("model '{model}' exhausted after plain-mode retry");
                }
                Err(e) => log::warn!("model '{model}' retry call failed: {e}"),
            }
        }

        Err(AppError::ProviderError(
            "all candidate models failed to produce usable output".to_string(),
        ))
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}

fn parse_raw<T, F>(raw: &str, parse: &F) -> Option<T>
where
    F: Fn(&serde_json::Value) -> Option<T>,
{
    match extract_json_object(raw) {
        Ok(value) => parse(&value),
        Err(e) => {
            log::debug!("JSON extraction failed: {e}");
            None
        }
    }
}

fn parse_problem(value: &serde_json::Value) -> Option<GeneratedProblem> {
    let problem: GeneratedProblem = serde_json::from_value(value.clone()).ok()?;
    let usable = problem.final_answer.is_finite() && !problem.problem_text.trim().is_empty();
    usable.then_some(problem)
}

fn parse_text_key(key: &'static str) -> impl Fn(&serde_json::Value) -> Option<String> {
    move |value| {
        let text = value.get(key)?.as_str()?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn problem_prompt(
    difficulty: Difficulty,
    prob_type: ProblemType,
    topic: &str,
    nonce: &Uuid,
) -> String {
    format!(
        "Difficulty: {difficulty}\n\
         Operation: {prob_type}\n\
         Topic idea: {topic}\n\
         Novelty token (ignore in the output): {nonce}\n\n\
         Write one new arithmetic word problem as the required JSON object."
    )
}

fn pick_topic(nonce: &Uuid, offset: usize) -> &'static str {
    let idx = (nonce.as_bytes()[0] as usize + offset) % TOPIC_HINTS.len();
    TOPIC_HINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chat_client::MockChatProvider;

    fn service(provider: MockChatProvider, models: &[&str]) -> GenerationService {
        GenerationService::new(
            Arc::new(provider),
            models.iter().map(|m| m.to_string()).collect(),
        )
    }

    const PROBLEM_JSON: &str = r#"{"problem_text": "A farmer has 3 baskets of 8 apples. How many apples?", "final_answer": 24}"#;

    #[tokio::test]
    async fn plain_retry_stays_on_the_same_model() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .withf(|model, _, _, json_mode| model == "model-a" && *json_mode)
            .times(1)
            .returning(|_, _, _, _| Ok("I cannot answer in JSON, sorry!".to_string()));
        provider
            .expect_chat()
            .withf(|model, _, prompt, json_mode| {
                model == "model-a" && !*json_mode && prompt.starts_with(PLAIN_RETRY_PREFIX)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(PROBLEM_JSON.to_string()));
        // Any call reaching model-b would panic: no expectation matches.

        let service = service(provider, &["model-a", "model-b"]);
        let problem = service
            .generate_problem(Difficulty::Easy, ProblemType::Multiplication, None)
            .await
            .unwrap();
        assert_eq!(problem.final_answer, 24.0);
    }

    #[tokio::test]
    async fn thrown_call_advances_without_plain_retry() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .withf(|model, _, _, json_mode| model == "model-a" && *json_mode)
            .times(1)
            .returning(|_, _, _, _| Err(AppError::ProviderError("connection refused".into())));
        provider
            .expect_chat()
            .withf(|model, _, _, json_mode| model == "model-b" && *json_mode)
            .times(1)
            .returning(|_, _, _, _| Ok(PROBLEM_JSON.to_string()));

        let service = service(provider, &["model-a", "model-b"]);
        let problem = service
            .generate_problem(Difficulty::Hard, ProblemType::Mixed, None)
            .await
            .unwrap();
        assert!(problem.problem_text.contains("apples"));
    }

    #[tokio::test]
    async fn all_models_exhausted_is_a_provider_error() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .times(4) // two models, structured attempt + plain retry each
            .returning(|_, _, _, _| Ok("still not json".to_string()));

        let service = service(provider, &["model-a", "model-b"]);
        let err = service
            .feedback("problem", 4.0, 5.0, Band::Near)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderError(_)));
    }

    #[tokio::test]
    async fn fenced_structured_output_is_accepted() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .times(1)
            .returning(|_, _, _, _| Ok(format!("```json\n{PROBLEM_JSON}\n```")));

        let service = service(provider, &["model-a"]);
        let problem = service
            .generate_problem(Difficulty::Easy, ProblemType::Addition, None)
            .await
            .unwrap();
        assert_eq!(problem.final_answer, 24.0);
    }

    #[tokio::test]
    async fn duplicate_of_previous_problem_triggers_one_retry() {
        let previous = "A farmer has 3 baskets of 8 apples. How many apples?";
        let mut provider = MockChatProvider::new();

        let mut calls = 0;
        provider
            .expect_chat()
            .times(2)
            .returning(move |_, _, _, _| {
                calls += 1;
                if calls == 1 {
                    Ok(PROBLEM_JSON.to_string())
                } else {
                    Ok(r#"{"problem_text": "Nina saves 5 coins a day for 4 days. How many coins?", "final_answer": 20}"#.to_string())
                }
            });

        let service = service(provider, &["model-a"]);
        let problem = service
            .generate_problem(Difficulty::Easy, ProblemType::Multiplication, Some(previous))
            .await
            .unwrap();
        assert_eq!(problem.final_answer, 20.0);
        assert_ne!(problem.problem_text, previous);
    }

    #[tokio::test]
    async fn hint_prompt_never_contains_the_answer() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .withf(|_, system, prompt, _| {
                // Only the problem text goes into the context; the stored
                // correct answer (7 here) has no way in.
                !prompt.contains('7')
                    && !prompt.contains("Correct answer")
                    && !system.contains("answer is")
            })
            .times(1)
            .returning(|_, _, _, _| Ok(r#"{"hint": "Think about equal groups."}"#.to_string()));

        let service = service(provider, &["model-a"]);
        let hint = service
            .hint("Split some marbles into six equal bags.")
            .await
            .unwrap();
        assert_eq!(hint, "Think about equal groups.");
    }

    #[tokio::test]
    async fn problem_with_missing_keys_is_rejected() {
        let mut provider = MockChatProvider::new();

        provider
            .expect_chat()
            .times(2) // structured + plain retry on the only model
            .returning(|_, _, _, _| Ok(r#"{"problem_text": "No answer key here"}"#.to_string()));

        let service = service(provider, &["model-a"]);
        let err = service
            .generate_problem(Difficulty::Medium, ProblemType::Subtraction, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderError(_)));
    }

    #[test]
    fn topic_offset_changes_the_hint() {
        let nonce = Uuid::new_v4();
        assert_ne!(pick_topic(&nonce, 0), pick_topic(&nonce, 1));
    }
}
