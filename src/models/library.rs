use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Questionnaire answers. Blob shape is a collaborator contract with the
/// stored `bookFinderPreferences` key; fields keep their wire casing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub reading_level: Option<String>,
    /// Comma-separated favorite authors, as typed.
    pub authors: String,
    /// Genre option ids, first one carries the most weight.
    pub genres: Vec<String>,
    /// Mood option ids.
    pub moods: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalData {
    pub wishlist: Vec<WishlistEntry>,
    pub sections: Vec<JournalSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalSection {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Read count and earned badges, the `bookFinderChallenge` blob. The goal
/// lives in its own blob so changing it never rewrites progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeState {
    pub read: u32,
    pub badges: Vec<String>,
}

/// Computed challenge view returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgress {
    pub goal: u32,
    pub read: u32,
    pub percent: u32,
    pub message: String,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub label: String,
    pub description: String,
}
