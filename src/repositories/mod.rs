pub mod session_repository;
pub mod submission_repository;

pub use session_repository::{MongoSessionRepository, SessionRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};

#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
