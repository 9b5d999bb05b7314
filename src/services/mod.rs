pub mod catalog;
pub mod curated;
pub mod library;
pub mod options;
pub mod query;
pub mod ranker;
pub mod recommend;
pub mod search;
pub mod store;

// Re-export public types
pub use catalog::CatalogClient;
pub use library::LibraryService;
pub use recommend::RecommendationService;
pub use search::SearchService;
pub use store::{BlobStore, FileStore};
