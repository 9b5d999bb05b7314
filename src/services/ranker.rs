use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::Volume;

/// One filter pipeline, two strictness levels. Relaxed is Strict minus the
/// popularity stage and is only used as the fallback when Strict empties a
/// non-empty candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Strict,
    Relaxed,
}

/// Accolade keyword, display label, and ranking bonus. The bonus constants
/// dwarf any realistic ratings count, so an accoladed volume always sorts
/// above a non-accoladed one.
pub struct Accolade {
    pub term: &'static str,
    pub label: &'static str,
    pub score: u64,
}

pub const ACCOLADES: [Accolade; 3] = [
    Accolade {
        term: "new york times bestseller",
        label: "NYT Bestseller",
        score: 1_000_000,
    },
    Accolade {
        term: "the week junior",
        label: "Week Junior Pick",
        score: 1_000_000,
    },
    Accolade {
        term: "award",
        label: "Award Winner",
        score: 500_000,
    },
];

/// Title/subtitle keywords that mark a volume as being *about* another book
/// (study guides, summaries, companions) rather than the book itself.
const META_KEYWORDS: [&str; 12] = [
    "summary",
    "analysis",
    "study guide",
    "notes",
    "sparknotes",
    "cliffsnotes",
    "writing",
    "how to",
    "guide",
    "handbook",
    "companion",
    "encyclopedia",
];

/// Category labels dropped from results unless the volume is also tagged
/// with a fiction-ish category.
const EXCLUDED_CATEGORIES: [&str; 9] = [
    "literary criticism",
    "biography",
    "history",
    "social science",
    "education",
    "language arts",
    "reference",
    "computers",
    "technology",
];

lazy_static! {
    /// Arabic, Hebrew, CJK and Cyrillic blocks. Catalog language metadata
    /// lies often enough that titles get checked character by character.
    static ref NON_LATIN_SCRIPT: Regex = Regex::new(
        "[\\x{0600}-\\x{06FF}\\x{0590}-\\x{05FF}\\x{4E00}-\\x{9FFF}\\x{0400}-\\x{04FF}]"
    )
    .unwrap();
}

/// Run the full post-processing pipeline over raw catalog results: cover
/// filter, strict content filter (with the relaxed fallback), then the
/// popularity/accolade ranking.
pub fn filter_and_rank(items: Vec<Volume>) -> Vec<Volume> {
    let total = items.len();

    // Stage 1: no cover, no card. Curated volumes always survive.
    let with_covers: Vec<Volume> = items
        .into_iter()
        .filter(|v| v.is_curated || v.has_thumbnail())
        .collect();

    let with_covers_len = with_covers.len();
    let strict: Vec<Volume> = with_covers
        .iter()
        .filter(|v| passes(v, FilterMode::Strict))
        .cloned()
        .collect();

    let survivors = if strict.is_empty() && !with_covers.is_empty() {
        debug!(
            "strict filter emptied {} candidates, retrying relaxed",
            with_covers.len()
        );
        with_covers
            .iter()
            .filter(|v| passes(v, FilterMode::Relaxed))
            .cloned()
            .collect()
    } else {
        strict
    };

    debug!(
        "filter pipeline: {} raw -> {} with covers -> {} survivors",
        total,
        with_covers_len,
        survivors.len()
    );

    rank(survivors)
}

/// Stages 2-4 of the pipeline for a single volume.
///
/// Curated volumes skip the meta/category and popularity stages but the
/// language stage is a hard filter with no exemptions.
pub fn passes(volume: &Volume, mode: FilterMode) -> bool {
    if !is_english(volume) {
        return false;
    }
    if volume.is_curated {
        return true;
    }
    if is_meta(volume) || has_excluded_category(volume) {
        return false;
    }
    match mode {
        FilterMode::Strict => volume.ratings_count() >= 1 || accolade(volume).is_some(),
        FilterMode::Relaxed => true,
    }
}

/// Sort descending by ratings count plus accolade bonus.
pub fn rank(mut items: Vec<Volume>) -> Vec<Volume> {
    items.sort_by(|a, b| score(b).cmp(&score(a)));
    items
}

/// Ranking score: ratings count, plus the bonus of the first matching
/// accolade.
pub fn score(volume: &Volume) -> u64 {
    let base = u64::from(volume.ratings_count());
    match accolade(volume) {
        Some(accolade) => base + accolade.score,
        None => base,
    }
}

/// First accolade whose keyword appears in the volume's description or
/// snippet text, in table order.
pub fn accolade(volume: &Volume) -> Option<&'static Accolade> {
    let text = volume.text_blob();
    ACCOLADES.iter().find(|a| text.contains(a.term))
}

fn is_english(volume: &Volume) -> bool {
    let info = &volume.volume_info;
    if info.language.as_deref() != Some("en") {
        return false;
    }
    let title = info.title.as_deref().unwrap_or("");
    let subtitle = info.subtitle.as_deref().unwrap_or("");
    !NON_LATIN_SCRIPT.is_match(title) && !NON_LATIN_SCRIPT.is_match(subtitle)
}

fn is_meta(volume: &Volume) -> bool {
    let info = &volume.volume_info;
    let title = info.title.as_deref().unwrap_or("").to_lowercase();
    let subtitle = info.subtitle.as_deref().unwrap_or("").to_lowercase();
    META_KEYWORDS
        .iter()
        .any(|kw| title.contains(kw) || subtitle.contains(kw))
}

fn has_excluded_category(volume: &Volume) -> bool {
    let categories: Vec<String> = volume
        .volume_info
        .categories
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let excluded = categories
        .iter()
        .any(|cat| EXCLUDED_CATEGORIES.iter().any(|ex| cat.contains(ex)));
    // A "History" tag next to a "Fiction" tag means historical fiction,
    // not a history textbook.
    let fictionish = categories
        .iter()
        .any(|cat| cat.contains("fiction") || cat.contains("fantasy") || cat.contains("sci"));

    excluded && !fictionish
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageLinks, SearchInfo, VolumeInfo};

    fn volume(id: &str) -> Volume {
        Volume {
            id: id.to_string(),
            volume_info: VolumeInfo {
                title: Some("A Perfectly Ordinary Novel".to_string()),
                language: Some("en".to_string()),
                ratings_count: Some(10),
                image_links: Some(ImageLinks {
                    thumbnail: Some("http://example.test/cover.jpg".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            search_info: None,
            is_curated: false,
        }
    }

    fn with_description(mut v: Volume, text: &str) -> Volume {
        v.volume_info.description = Some(text.to_string());
        v
    }

    #[test]
    fn drops_volumes_without_covers() {
        let mut bare = volume("bare");
        bare.volume_info.image_links = None;
        let kept = filter_and_rank(vec![volume("ok"), bare]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "ok");
    }

    #[test]
    fn curated_survives_missing_cover_and_bad_category() {
        let mut curated = volume("curated");
        curated.is_curated = true;
        curated.volume_info.image_links = None;
        curated.volume_info.categories = vec!["Literary Criticism".to_string()];
        curated.volume_info.ratings_count = None;

        let kept = filter_and_rank(vec![curated]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "curated");
    }

    #[test]
    fn curated_is_still_dropped_on_non_latin_script() {
        let mut curated = volume("curated");
        curated.is_curated = true;
        curated.volume_info.title = Some("Война и мир".to_string());

        assert!(filter_and_rank(vec![curated]).is_empty());
    }

    #[test]
    fn meta_books_are_dropped() {
        let mut meta = volume("meta");
        meta.volume_info.title = Some("Study Guide: Dune".to_string());
        let kept = filter_and_rank(vec![volume("ok"), meta]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "ok");
    }

    #[test]
    fn excluded_category_spared_by_fiction_tag() {
        let mut hist_fic = volume("hist-fic");
        hist_fic.volume_info.categories =
            vec!["History".to_string(), "Fiction".to_string()];
        let mut textbook = volume("textbook");
        textbook.volume_info.categories = vec!["History".to_string()];

        let kept = filter_and_rank(vec![hist_fic, textbook]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "hist-fic");
    }

    #[test]
    fn declared_language_must_be_english() {
        let mut french = volume("fr");
        french.volume_info.language = Some("fr".to_string());
        assert!(!passes(&french, FilterMode::Relaxed));
    }

    #[test]
    fn zero_ratings_excluded_only_under_strict() {
        let mut obscure = volume("obscure");
        obscure.volume_info.ratings_count = Some(0);

        assert!(!passes(&obscure, FilterMode::Strict));
        assert!(passes(&obscure, FilterMode::Relaxed));
    }

    #[test]
    fn accolade_rescues_zero_rating_volume_under_strict() {
        let mut praised = volume("praised");
        praised.volume_info.ratings_count = None;
        let praised = with_description(praised, "Winner of the National Book Award.");

        assert!(passes(&praised, FilterMode::Strict));
    }

    #[test]
    fn relaxed_fallback_kicks_in_when_strict_empties_the_set() {
        let mut obscure = volume("obscure");
        obscure.volume_info.ratings_count = Some(0);

        let kept = filter_and_rank(vec![obscure]);
        assert_eq!(kept.len(), 1, "relaxed pass should rescue the only candidate");
    }

    #[test]
    fn accolade_outranks_any_rating_count() {
        let popular = {
            let mut v = volume("popular");
            v.volume_info.ratings_count = Some(250_000);
            v
        };
        let praised = with_description(
            {
                let mut v = volume("praised");
                v.volume_info.ratings_count = Some(3);
                v
            },
            "A #1 New York Times Bestseller phenomenon.",
        );

        let ranked = filter_and_rank(vec![popular, praised]);
        assert_eq!(ranked[0].id, "praised");
        assert_eq!(ranked[1].id, "popular");
    }

    #[test]
    fn accolade_bonus_is_first_match_wins() {
        let v = with_description(
            volume("double"),
            "A New York Times Bestseller and an award winner.",
        );
        // Only the first matching table entry contributes.
        assert_eq!(score(&v), 10 + 1_000_000);
        assert_eq!(accolade(&v).unwrap().label, "NYT Bestseller");
    }

    #[test]
    fn snippet_text_counts_for_accolades() {
        let mut v = volume("snippet");
        v.search_info = Some(SearchInfo {
            text_snippet: Some("An Award-winning debut.".to_string()),
        });
        assert_eq!(accolade(&v).unwrap().label, "Award Winner");
    }

    #[test]
    fn ranking_is_descending_by_ratings_count() {
        let mut a = volume("a");
        a.volume_info.ratings_count = Some(5);
        let mut b = volume("b");
        b.volume_info.ratings_count = Some(500);

        let ranked = rank(vec![a, b]);
        assert_eq!(ranked[0].id, "b");
    }
}
