use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{GenerateProblemRequest, SessionRequest, SubmitAnswerRequest},
};

#[post("/generate")]
pub async fn generate_problem(
    state: web::Data<AppState>,
    request: web::Json<GenerateProblemRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let (difficulty, prob_type) = request.resolve()?;
    let response = state.problem_service.generate(difficulty, prob_type).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/submit")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let response = state
        .problem_service
        .submit(&request.session_id, &request.user_answer)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/hint")]
pub async fn get_hint(
    state: web::Data<AppState>,
    request: web::Json<SessionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let response = state.problem_service.hint(&request.session_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/solution")]
pub async fn get_solution(
    state: web::Data<AppState>,
    request: web::Json<SessionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let response = state.problem_service.solution(&request.session_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/score")]
pub async fn get_score(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = state.problem_service.score().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().body("ok"))
}
