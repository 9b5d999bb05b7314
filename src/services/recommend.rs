use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info};

use crate::models::{Preferences, RecommendationShelves, Volume};
use crate::services::options::{genre_subject_label, mood_label, reading_level_query};
use crate::services::search::SearchService;

const AUTHOR_SHELF_LIMIT: usize = 2;

/// Builds the two recommendation shelves from stored preferences: one from
/// favorite authors, one from the genre/mood/level taste profile.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    search: SearchService,
}

impl RecommendationService {
    pub fn new(search: SearchService) -> Self {
        Self { search }
    }

    pub async fn shelves(&self, preferences: &Preferences) -> RecommendationShelves {
        if !has_preferences(preferences) {
            return RecommendationShelves {
                has_preferences: false,
                author_books: Vec::new(),
                taste_books: Vec::new(),
            };
        }

        let author_books = self.author_shelf(preferences).await;
        let taste_query = build_taste_query(preferences);
        info!("taste shelf query: '{}'", taste_query);
        let taste_books = self.search.search(&taste_query).await;

        RecommendationShelves {
            has_preferences: true,
            author_books,
            taste_books,
        }
    }

    /// Concurrent per-author similarity lookups, first two authors only.
    /// A failing lookup contributes no items; results dedupe by id with
    /// the first occurrence winning.
    async fn author_shelf(&self, preferences: &Preferences) -> Vec<Volume> {
        let authors: Vec<&str> = split_authors(&preferences.authors)
            .into_iter()
            .take(AUTHOR_SHELF_LIMIT)
            .collect();
        if authors.is_empty() {
            return Vec::new();
        }

        let lookups = authors
            .iter()
            .copied()
            .map(|author| self.search.similar(None, Some(author)));
        let batches = join_all(lookups).await;

        let mut seen = HashSet::new();
        let mut shelf = Vec::new();
        for volume in batches.into_iter().flatten() {
            if seen.insert(volume.id.clone()) {
                shelf.push(volume);
            }
        }
        debug!("author shelf: {} unique volumes", shelf.len());
        shelf
    }
}

fn has_preferences(preferences: &Preferences) -> bool {
    preferences.reading_level.is_some()
        || !preferences.genres.is_empty()
        || !split_authors(&preferences.authors).is_empty()
}

fn split_authors(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

/// Assemble the taste query: field filters first (`inauthor:`, `subject:`),
/// then loose keywords (reading level term, a second genre, one mood).
/// Example: `inauthor:"Chris Colfer" subject:"Fantasy" middle grade Excited`.
pub fn build_taste_query(preferences: &Preferences) -> String {
    let mut api_parts: Vec<String> = Vec::new();
    let mut keyword_parts: Vec<String> = Vec::new();

    if let Some(author) = split_authors(&preferences.authors).first() {
        api_parts.push(format!("inauthor:\"{}\"", author));
    }

    if let Some(level_id) = preferences.reading_level.as_deref() {
        if let Some(level_query) = reading_level_query(level_id) {
            keyword_parts.push(level_query.to_string());
        }
    }

    let genre_labels: Vec<&str> = preferences
        .genres
        .iter()
        .filter_map(|id| genre_subject_label(id))
        .collect();
    if let Some(first) = genre_labels.first() {
        api_parts.push(format!("subject:\"{}\"", first));
        // One extra genre keyword at most; more over-constrains the search.
        if let Some(second) = genre_labels.get(1) {
            keyword_parts.push((*second).to_string());
        }
    }

    if let Some(mood) = preferences.moods.iter().filter_map(|id| mood_label(id)).next() {
        keyword_parts.push(mood.to_string());
    }

    let query = api_parts
        .into_iter()
        .chain(keyword_parts)
        .collect::<Vec<_>>()
        .join(" ");

    if query.trim().is_empty() {
        "books".to_string()
    } else {
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences() -> Preferences {
        Preferences {
            reading_level: Some("3-5".to_string()),
            authors: "Chris Colfer, Kate DiCamillo".to_string(),
            genres: vec!["fantasy".to_string(), "scifi".to_string()],
            moods: vec!["excited".to_string()],
        }
    }

    #[test]
    fn taste_query_orders_filters_before_keywords() {
        let query = build_taste_query(&preferences());
        assert_eq!(
            query,
            "inauthor:\"Chris Colfer\" subject:\"Fantasy\" middle grade science fiction Excited"
        );
    }

    #[test]
    fn scifi_first_genre_becomes_subject_filter() {
        let mut prefs = preferences();
        prefs.genres = vec!["scifi".to_string()];
        assert!(build_taste_query(&prefs).contains("subject:\"science fiction\""));
    }

    #[test]
    fn empty_preferences_fall_back_to_books() {
        let query = build_taste_query(&Preferences::default());
        assert_eq!(query, "books");
    }

    #[test]
    fn unknown_ids_are_skipped_not_errors() {
        let prefs = Preferences {
            reading_level: Some("college".to_string()),
            authors: " , ".to_string(),
            genres: vec!["nope".to_string()],
            moods: vec!["bored".to_string()],
        };
        assert_eq!(build_taste_query(&prefs), "books");
        assert!(!has_preferences(&Preferences::default()));
        // A reading level alone counts as having preferences, even if the
        // id no longer resolves.
        assert!(has_preferences(&prefs));
    }

    #[test]
    fn authors_split_on_commas_and_trim() {
        assert_eq!(
            split_authors(" Ursula K. Le Guin , ,Terry Pratchett"),
            vec!["Ursula K. Le Guin", "Terry Pratchett"]
        );
    }
}
