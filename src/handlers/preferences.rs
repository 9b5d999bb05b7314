use actix_web::{
    web::{self, Json},
    HttpResponse,
};

use crate::{error::ApiError, models::Preferences, services::LibraryService};

pub fn preferences_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/preferences")
            .route(web::get().to(get_preferences))
            .route(web::put().to(save_preferences)),
    );
}

/// Stored questionnaire answers; defaults when nothing is saved yet
#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "Library",
    responses(
        (status = 200, description = "Stored preferences", body = Preferences),
    )
)]
pub async fn get_preferences(library: web::Data<LibraryService>) -> HttpResponse {
    HttpResponse::Ok().json(library.preferences())
}

/// Replace the stored preferences wholesale
#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "Library",
    request_body = Preferences,
    responses(
        (status = 200, description = "Saved preferences", body = Preferences),
    )
)]
pub async fn save_preferences(
    preferences: Json<Preferences>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    library.save_preferences(&preferences)?;
    Ok(HttpResponse::Ok().json(preferences.into_inner()))
}
