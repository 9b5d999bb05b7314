use actix_web::{
    web::{self, Json},
    HttpResponse,
};

use crate::{error::ApiError, models::GoalRequest, services::LibraryService};

pub fn challenge_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/challenge").route(web::get().to(get_challenge)))
        .service(web::resource("/challenge/goal").route(web::put().to(set_goal)))
        .service(web::resource("/challenge/log").route(web::post().to(log_book)))
        .service(web::resource("/challenge/reset").route(web::post().to(reset)));
}

/// Current reading-challenge progress
#[utoipa::path(
    get,
    path = "/api/challenge",
    tag = "Challenge",
    responses(
        (status = 200, description = "Progress report", body = crate::models::ChallengeProgress),
    )
)]
pub async fn get_challenge(library: web::Data<LibraryService>) -> HttpResponse {
    HttpResponse::Ok().json(library.challenge())
}

#[utoipa::path(
    put,
    path = "/api/challenge/goal",
    tag = "Challenge",
    request_body = GoalRequest,
    responses(
        (status = 200, description = "Progress with the new goal", body = crate::models::ChallengeProgress),
        (status = 400, description = "Goal must be at least 1", body = crate::models::ErrorResponse),
    )
)]
pub async fn set_goal(
    request: Json<GoalRequest>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    if request.goal == 0 {
        return Err(ApiError::InvalidInput(
            "Goal must be at least 1".to_string(),
        ));
    }
    let progress = library.set_goal(request.goal)?;
    Ok(HttpResponse::Ok().json(progress))
}

/// Log one finished book
#[utoipa::path(
    post,
    path = "/api/challenge/log",
    tag = "Challenge",
    responses(
        (status = 200, description = "Updated progress", body = crate::models::ChallengeProgress),
    )
)]
pub async fn log_book(
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    let progress = library.log_book()?;
    Ok(HttpResponse::Ok().json(progress))
}

/// Start the challenge over: read count and badges back to zero
#[utoipa::path(
    post,
    path = "/api/challenge/reset",
    tag = "Challenge",
    responses(
        (status = 200, description = "Reset progress", body = crate::models::ChallengeProgress),
    )
)]
pub async fn reset(library: web::Data<LibraryService>) -> Result<HttpResponse, ApiError> {
    let progress = library.reset_challenge()?;
    Ok(HttpResponse::Ok().json(progress))
}
