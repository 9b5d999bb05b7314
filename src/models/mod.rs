use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export the catalog and library shapes
pub use library::{
    Badge, ChallengeProgress, ChallengeState, JournalData, JournalSection, Preferences,
    WishlistEntry,
};
pub use volume::{ImageLinks, SearchInfo, Volume, VolumeInfo, VolumesPage};

mod library;
mod volume;

/// Request structure for a free-text search
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// The free-text query to search the catalog for
    #[schema(example = "fantasy with dragons")]
    pub query: String,
}

/// Response structure for a free-text search
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// Filtered and ranked volumes
    pub results: Vec<Volume>,
    /// Number of volumes in `results`
    pub total: usize,
}

/// Request structure for similar-volume lookups; at least one of the two
/// fields must be present
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimilarRequest {
    /// Category to match, takes priority over the author
    #[schema(example = "Fiction")]
    pub category: Option<String>,
    /// Author to match
    #[schema(example = "Frank Herbert")]
    pub author: Option<String>,
}

/// The two recommendation shelves built from stored preferences
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationShelves {
    /// False when no preferences have been saved yet
    pub has_preferences: bool,
    /// Volumes by the reader's favorite authors
    pub author_books: Vec<Volume>,
    /// Volumes matching the genre/mood/level taste profile
    pub taste_books: Vec<Volume>,
}

/// Request structure for adding a wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistRequest {
    #[schema(example = "The Name of the Wind")]
    pub title: String,
}

/// Request structure for creating a journal section
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionCreateRequest {
    /// Optional title; a default is used when omitted
    pub title: Option<String>,
}

/// Request structure for updating a journal section; omitted fields are
/// left untouched
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request structure for setting the reading-challenge goal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GoalRequest {
    #[schema(example = 12, minimum = 1)]
    pub goal: u32,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Query cannot be empty")]
    pub error: String,
}
