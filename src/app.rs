use crate::{
    config::Config,
    error::Result,
    routes::{api_routes, openapi_route, swagger_routes},
    services::{
        CatalogClient, FileStore, LibraryService, RecommendationService, SearchService,
    },
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::search::search,
        crate::handlers::search::volume_detail,
        crate::handlers::search::similar,
        crate::handlers::search::surprise,
        crate::handlers::recommendations::recommendations,
        crate::handlers::preferences::get_preferences,
        crate::handlers::preferences::save_preferences,
        crate::handlers::journal::get_journal,
        crate::handlers::journal::add_wishlist,
        crate::handlers::journal::remove_wishlist,
        crate::handlers::journal::add_section,
        crate::handlers::journal::update_section,
        crate::handlers::journal::remove_section,
        crate::handlers::challenge::get_challenge,
        crate::handlers::challenge::set_goal,
        crate::handlers::challenge::log_book,
        crate::handlers::challenge::reset,
    ),
    components(schemas(
        crate::models::Volume,
        crate::models::VolumeInfo,
        crate::models::ImageLinks,
        crate::models::SearchInfo,
        crate::models::SearchRequest,
        crate::models::SearchResponse,
        crate::models::SimilarRequest,
        crate::models::RecommendationShelves,
        crate::models::Preferences,
        crate::models::JournalData,
        crate::models::WishlistEntry,
        crate::models::JournalSection,
        crate::models::WishlistRequest,
        crate::models::SectionCreateRequest,
        crate::models::SectionUpdateRequest,
        crate::models::GoalRequest,
        crate::models::ChallengeProgress,
        crate::models::Badge,
        crate::models::HealthResponse,
        crate::models::ErrorResponse,
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Search", description = "Catalog search, details, similar volumes"),
        (name = "Recommendations", description = "Preference-driven shelves"),
        (name = "Library", description = "Preferences and journal"),
        (name = "Challenge", description = "Reading challenge progress"),
    )
)]
pub struct ApiDoc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for container compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Initialize services
        let catalog = CatalogClient::new(&self.config.books_api_url);
        let search_service = SearchService::new(catalog);

        let store = FileStore::new(&self.config.data_dir)
            .context("Failed to open the library data directory")?;
        let library_service = web::Data::new(LibraryService::new(Arc::new(store)));

        let recommendation_service =
            web::Data::new(RecommendationService::new(search_service.clone()));
        let search_service = web::Data::new(search_service);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(search_service.clone())
                .app_data(recommendation_service.clone())
                .app_data(library_service.clone())
                .service(api_routes())
                .service(swagger_routes())
                .service(openapi_route())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
