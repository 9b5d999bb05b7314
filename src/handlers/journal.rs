use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{SectionCreateRequest, SectionUpdateRequest, WishlistRequest},
    services::LibraryService,
};

pub fn journal_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/journal").route(web::get().to(get_journal)))
        .service(web::resource("/journal/wishlist").route(web::post().to(add_wishlist)))
        .service(
            web::resource("/journal/wishlist/{id}").route(web::delete().to(remove_wishlist)),
        )
        .service(web::resource("/journal/sections").route(web::post().to(add_section)))
        .service(
            web::resource("/journal/sections/{id}")
                .route(web::patch().to(update_section))
                .route(web::delete().to(remove_section)),
        );
}

/// The whole journal: wishlist plus free-form sections
#[utoipa::path(
    get,
    path = "/api/journal",
    tag = "Library",
    responses(
        (status = 200, description = "Journal contents", body = crate::models::JournalData),
    )
)]
pub async fn get_journal(library: web::Data<LibraryService>) -> HttpResponse {
    HttpResponse::Ok().json(library.journal())
}

#[utoipa::path(
    post,
    path = "/api/journal/wishlist",
    tag = "Library",
    request_body = WishlistRequest,
    responses(
        (status = 201, description = "Entry added", body = crate::models::WishlistEntry),
        (status = 400, description = "Empty title", body = crate::models::ErrorResponse),
    )
)]
pub async fn add_wishlist(
    request: Json<WishlistRequest>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::InvalidInput("Title cannot be empty".to_string()));
    }
    let entry = library.add_wishlist_entry(title)?;
    Ok(HttpResponse::Created().json(entry))
}

#[utoipa::path(
    delete,
    path = "/api/journal/wishlist/{id}",
    tag = "Library",
    params(("id" = Uuid, Path, description = "Wishlist entry id")),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 404, description = "No such entry", body = crate::models::ErrorResponse),
    )
)]
pub async fn remove_wishlist(
    id: web::Path<Uuid>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    if library.remove_wishlist_entry(*id)? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound("Wishlist entry not found".to_string()))
    }
}

#[utoipa::path(
    post,
    path = "/api/journal/sections",
    tag = "Library",
    request_body = SectionCreateRequest,
    responses(
        (status = 201, description = "Section created", body = crate::models::JournalSection),
    )
)]
pub async fn add_section(
    request: Json<SectionCreateRequest>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let section = library.add_section(title)?;
    Ok(HttpResponse::Created().json(section))
}

#[utoipa::path(
    patch,
    path = "/api/journal/sections/{id}",
    tag = "Library",
    params(("id" = Uuid, Path, description = "Journal section id")),
    request_body = SectionUpdateRequest,
    responses(
        (status = 200, description = "Updated section", body = crate::models::JournalSection),
        (status = 404, description = "No such section", body = crate::models::ErrorResponse),
    )
)]
pub async fn update_section(
    id: web::Path<Uuid>,
    request: Json<SectionUpdateRequest>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    match library.update_section(*id, request.title.as_deref(), request.content.as_deref())? {
        Some(section) => Ok(HttpResponse::Ok().json(section)),
        None => Err(ApiError::NotFound("Journal section not found".to_string())),
    }
}

#[utoipa::path(
    delete,
    path = "/api/journal/sections/{id}",
    tag = "Library",
    params(("id" = Uuid, Path, description = "Journal section id")),
    responses(
        (status = 204, description = "Section removed"),
        (status = 404, description = "No such section", body = crate::models::ErrorResponse),
    )
)]
pub async fn remove_section(
    id: web::Path<Uuid>,
    library: web::Data<LibraryService>,
) -> Result<HttpResponse, ApiError> {
    if library.remove_section(*id)? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound("Journal section not found".to_string()))
    }
}
