use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    services::{LibraryService, RecommendationService},
};

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations").route(web::get().to(recommendations)));
}

/// Author and taste shelves built from the stored preferences. With no
/// preferences saved yet, both shelves come back empty and
/// `hasPreferences` is false.
#[utoipa::path(
    get,
    path = "/api/recommendations",
    tag = "Recommendations",
    responses(
        (status = 200, description = "Recommendation shelves", body = crate::models::RecommendationShelves),
    )
)]
pub async fn recommendations(
    recommendation_service: web::Data<RecommendationService>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    let preferences = library.preferences();
    let shelves = recommendation_service.shelves(&preferences).await;
    Ok(HttpResponse::Ok().json(shelves))
}
