pub mod problem_handler;

pub use problem_handler::{
    generate_problem, get_hint, get_score, get_solution, health_check, submit_answer,
};
