use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::debug;

use crate::services::curated::curated_list;

/// How a free-text query should be sent to the catalog.
///
/// Exactly one plan is chosen per query, in this order: curated list match,
/// fiction rewrite, non-fiction subject filter, literal passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// The normalized query names a genre with a hand-picked title list.
    Curated { genre: String },
    /// The query mentions a fiction genre; connectors stripped, "novel" appended.
    Fiction { query: String },
    /// The normalized query is exactly a non-fiction genre; `subject:` filter.
    Subject { genre: String },
    /// Anything else goes through verbatim, original casing and all.
    Literal { query: String },
}

lazy_static! {
    /// Shorthand and plural forms users actually type, mapped to the
    /// canonical genre name. Applied only on an exact whole-query match.
    static ref GENRE_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("sci fi", "science fiction");
        m.insert("sci-fi", "science fiction");
        m.insert("sf", "science fiction");
        m.insert("scifi", "science fiction");
        m.insert("sci fic", "science fiction");
        m.insert("rom-com", "romance");
        m.insert("ya", "young adult");
        m.insert("kids", "juvenile fiction");
        m.insert("children", "juvenile fiction");
        m.insert("biographies", "biography");
        m.insert("history books", "history");
        m.insert("cookbooks", "cooking");
        m.insert("recipes", "cooking");
        m
    };

    static ref FICTION_GENRES: Vec<&'static str> = vec![
        "fantasy",
        "science fiction",
        "mystery",
        "romance",
        "horror",
        "thriller",
        "crime",
        "adventure",
        "juvenile fiction",
        "young adult",
        "realistic fiction",
    ];

    static ref NONFICTION_GENRES: Vec<&'static str> = vec![
        "history", "biography", "poetry", "cooking", "art", "travel", "classics",
    ];
}

/// Connector words stripped out of fiction queries before the rewrite.
const CONNECTOR_WORDS: [&str; 3] = ["with", "and", "&"];

/// Canonicalize a raw query: lowercase, trim, strip a trailing " books"
/// suffix, then resolve the alias table on an exact match. No partial
/// alias matching.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();
    let stripped = trimmed.strip_suffix(" books").unwrap_or(trimmed).trim();

    match GENRE_ALIASES.get(stripped) {
        Some(canonical) => (*canonical).to_string(),
        None => stripped.to_string(),
    }
}

/// Decide how to query the catalog for a raw user query.
pub fn plan(raw: &str) -> QueryPlan {
    let normalized = normalize(raw);

    if curated_list(&normalized).is_some() {
        debug!("using curated list for '{}'", normalized);
        return QueryPlan::Curated { genre: normalized };
    }

    plan_heuristic(raw)
}

/// The non-curated decision table. Split out so the curated fallback can
/// re-enter it with the original free-text query preserved.
pub fn plan_heuristic(raw: &str) -> QueryPlan {
    let normalized = normalize(raw);

    if FICTION_GENRES.iter().any(|g| normalized.contains(g)) {
        let cleaned = normalized
            .split_whitespace()
            .filter(|word| !CONNECTOR_WORDS.contains(word))
            .collect::<Vec<_>>()
            .join(" ");
        return QueryPlan::Fiction {
            query: format!("{} novel", cleaned),
        };
    }

    if NONFICTION_GENRES.contains(&normalized.as_str()) {
        return QueryPlan::Subject { genre: normalized };
    }

    QueryPlan::Literal {
        query: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_aliases_and_suffix() {
        assert_eq!(normalize("Sci-Fi Books"), "science fiction");
        assert_eq!(normalize("  SCIFI "), "science fiction");
        assert_eq!(normalize("history books"), "history");
        assert_eq!(normalize("recipes"), "cooking");
    }

    #[test]
    fn normalize_ignores_partial_alias_matches() {
        // "ya" is an alias, "ya dystopia" is not
        assert_eq!(normalize("ya dystopia"), "ya dystopia");
    }

    #[test]
    fn fiction_query_strips_connectors_and_appends_novel() {
        let plan = plan("fantasy with dragons");
        assert_eq!(
            plan,
            QueryPlan::Fiction {
                query: "fantasy dragons novel".to_string()
            }
        );
    }

    #[test]
    fn fiction_match_is_substring_based() {
        match plan("dark thriller set in Norway") {
            QueryPlan::Fiction { query } => {
                assert!(query.ends_with(" novel"));
                assert!(!query.contains(" and "));
            }
            other => panic!("expected fiction plan, got {:?}", other),
        }
    }

    #[test]
    fn nonfiction_requires_exact_match() {
        assert_eq!(
            plan("poetry"),
            QueryPlan::Subject {
                genre: "poetry".to_string()
            }
        );
        // Extra words mean it is no longer an exact non-fiction genre
        assert_eq!(
            plan("modern poetry anthologies"),
            QueryPlan::Literal {
                query: "modern poetry anthologies".to_string()
            }
        );
    }

    #[test]
    fn curated_genres_win_over_fiction_rewrite() {
        assert_eq!(
            plan("Fantasy Books"),
            QueryPlan::Curated {
                genre: "fantasy".to_string()
            }
        );
    }

    #[test]
    fn literal_passthrough_keeps_original_casing() {
        assert_eq!(
            plan("The Pragmatic Programmer"),
            QueryPlan::Literal {
                query: "The Pragmatic Programmer".to_string()
            }
        );
    }

    #[test]
    fn heuristic_fallback_preserves_raw_query() {
        // The curated fallback path must hand the raw text, not the
        // normalized text, to the literal branch.
        match plan_heuristic("Mystery Of Edwin Drood") {
            QueryPlan::Fiction { query } => {
                // "mystery" is a fiction genre, so the rewrite kicks in
                assert_eq!(query, "mystery of edwin drood novel");
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }
}
