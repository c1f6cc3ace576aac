pub mod problem_session;
pub mod submission;

pub use problem_session::{
    Difficulty, GeneratedProblem, ProblemLabel, ProblemSession, ProblemType,
};
pub use submission::{Band, Submission};
