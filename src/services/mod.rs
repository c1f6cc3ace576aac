pub mod answer;
pub mod chat_client;
pub mod generation;
pub mod grading;
pub mod json_extract;
pub mod problem;

pub use chat_client::{ChatProvider, OpenAiChatClient};
pub use generation::GenerationService;
pub use problem::ProblemService;
