use actix_web::{
    web::{self, Json},
    HttpResponse,
};

use crate::{
    error::ApiError,
    models::{SearchRequest, SearchResponse, SimilarRequest},
    services::SearchService,
};

pub fn search_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/search").route(web::post().to(search)))
        .service(web::resource("/volumes/{id}").route(web::get().to(volume_detail)))
        .service(web::resource("/similar").route(web::post().to(similar)))
        .service(web::resource("/surprise").route(web::post().to(surprise)));
}

/// Free-text catalog search with heuristic query planning and result
/// filtering/ranking. Catalog trouble shows up as an empty result list,
/// never as a 5xx.
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Filtered and ranked results", body = SearchResponse),
        (status = 400, description = "Empty query", body = crate::models::ErrorResponse),
    )
)]
pub async fn search(
    request: Json<SearchRequest>,
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let results = search_service.search(query).await;
    let total = results.len();

    Ok(HttpResponse::Ok().json(SearchResponse { results, total }))
}

/// Single volume detail lookup
#[utoipa::path(
    get,
    path = "/api/volumes/{id}",
    tag = "Search",
    params(("id" = String, Path, description = "Catalog volume identifier")),
    responses(
        (status = 200, description = "Volume detail", body = crate::models::Volume),
        (status = 404, description = "Unknown volume", body = crate::models::ErrorResponse),
    )
)]
pub async fn volume_detail(
    id: web::Path<String>,
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    match search_service.get_volume(&id).await {
        Some(volume) => Ok(HttpResponse::Ok().json(volume)),
        None => Err(ApiError::NotFound(format!(
            "Couldn't load details for volume {}",
            id
        ))),
    }
}

/// Similar-volume lookup by category and/or author, sorted oldest first
/// as a first-in-series proxy
#[utoipa::path(
    post,
    path = "/api/similar",
    tag = "Search",
    request_body = SimilarRequest,
    responses(
        (status = 200, description = "Similar volumes, unfiltered", body = SearchResponse),
        (status = 400, description = "Neither category nor author given", body = crate::models::ErrorResponse),
    )
)]
pub async fn similar(
    request: Json<SimilarRequest>,
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    let category = request.category.as_deref().filter(|c| !c.trim().is_empty());
    let author = request.author.as_deref().filter(|a| !a.trim().is_empty());

    if category.is_none() && author.is_none() {
        return Err(ApiError::InvalidInput(
            "Provide a category or an author".to_string(),
        ));
    }

    let results = search_service.similar(category, author).await;
    let total = results.len();

    Ok(HttpResponse::Ok().json(SearchResponse { results, total }))
}

/// Random genre, random shelf position, one pick
#[utoipa::path(
    post,
    path = "/api/surprise",
    tag = "Search",
    responses(
        (status = 200, description = "A surprise volume", body = crate::models::Volume),
        (status = 404, description = "No pick available right now", body = crate::models::ErrorResponse),
    )
)]
pub async fn surprise(
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    match search_service.surprise().await {
        Some(volume) => Ok(HttpResponse::Ok().json(volume)),
        None => Err(ApiError::NotFound(
            "No surprise pick available right now".to_string(),
        )),
    }
}
