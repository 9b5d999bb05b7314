use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::Volume;
use crate::services::catalog::{CatalogClient, VolumeQuery};
use crate::services::curated::{curated_list, CURATED_FETCH_LIMIT};
use crate::services::options::GENRE_OPTIONS;
use crate::services::query::{self, QueryPlan};
use crate::services::ranker;

const SEARCH_MAX_RESULTS: u32 = 40;
const SIMILAR_MAX_RESULTS: u32 = 20;
const SURPRISE_MAX_RESULTS: u32 = 10;
const SURPRISE_TIMEOUT: Duration = Duration::from_secs(8);

/// Free-text search, similar-volume lookup, and the surprise pick, layered
/// over the catalog client. Every catalog failure degrades to an empty
/// result set (or `None` for single-volume lookups); nothing here returns
/// an error to the handler layer.
#[derive(Debug, Clone)]
pub struct SearchService {
    catalog: CatalogClient,
}

impl SearchService {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// Plan, fetch, then filter and rank a free-text query.
    pub async fn search(&self, raw_query: &str) -> Vec<Volume> {
        let plan = query::plan(raw_query);
        debug!(?plan, "query planned");

        let raw_items = match &plan {
            QueryPlan::Curated { genre } => match self.fetch_curated(genre).await {
                Some(items) => items,
                None => {
                    // Every curated request failed; quietly retry through
                    // the heuristic path with the untouched original query.
                    warn!("curated lookup for '{}' failed entirely, falling back", genre);
                    self.fetch_planned(&query::plan_heuristic(raw_query)).await
                }
            },
            other => self.fetch_planned(other).await,
        };

        let results = ranker::filter_and_rank(raw_items);
        info!("search '{}' -> {} results", raw_query, results.len());
        results
    }

    /// Volumes similar to a given category and/or author, category first.
    /// Sorted by published date ascending as a first-in-series proxy;
    /// similarity results skip the filter pipeline by convention.
    pub async fn similar(&self, category: Option<&str>, author: Option<&str>) -> Vec<Volume> {
        let mut q = String::new();
        if let Some(category) = category {
            q.push_str(&format!("subject:{}", category));
        }
        if let Some(author) = author {
            q.push_str(&format!("+inauthor:{}", author));
        }
        if q.is_empty() {
            return Vec::new();
        }

        let query = VolumeQuery::new(q, SIMILAR_MAX_RESULTS).books();
        let mut items = match self.catalog.search(&query).await {
            Ok(items) => items,
            Err(e) => {
                warn!("similar search failed: {}", e);
                return Vec::new();
            }
        };

        items.sort_by(|a, b| published_date_key(a).cmp(&published_date_key(b)));
        items
    }

    /// Detail lookup; any failure is a `None`, not an error.
    pub async fn get_volume(&self, id: &str) -> Option<Volume> {
        match self.catalog.volume(id).await {
            Ok(volume) => Some(volume),
            Err(e) => {
                warn!("volume detail lookup for '{}' failed: {}", id, e);
                None
            }
        }
    }

    /// One random-ish pick from a random-ish genre shelf, raced against a
    /// timeout. The clock stands in for an RNG so no extra dependency is
    /// needed for a novelty feature.
    pub async fn surprise(&self) -> Option<Volume> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let genre = &GENRE_OPTIONS[now.as_secs() as usize % GENRE_OPTIONS.len()];
        let start_index = now.subsec_millis() % 20;

        info!("surprise pick from '{}' (startIndex {})", genre.label, start_index);

        let query = VolumeQuery::new(format!("subject:\"{}\"", genre.label), SURPRISE_MAX_RESULTS)
            .english()
            .starting_at(start_index);

        let items = match tokio::time::timeout(SURPRISE_TIMEOUT, self.catalog.search(&query)).await
        {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                warn!("surprise search failed: {}", e);
                return None;
            }
            Err(_) => {
                warn!("surprise search timed out after {:?}", SURPRISE_TIMEOUT);
                return None;
            }
        };

        if items.is_empty() {
            return None;
        }
        let pick = now.subsec_micros() as usize % items.len();
        items.into_iter().nth(pick)
    }

    /// Fan out one request per curated title, first `CURATED_FETCH_LIMIT`
    /// entries only. Individual failures contribute no items; `None` means
    /// every request failed and the caller should fall back.
    async fn fetch_curated(&self, genre: &str) -> Option<Vec<Volume>> {
        let entries = curated_list(genre)?;
        let entries = &entries[..entries.len().min(CURATED_FETCH_LIMIT)];

        let lookups = entries.iter().map(|entry| {
            let query = VolumeQuery::new(*entry, 1).books().english();
            async move { self.catalog.search(&query).await }
        });
        let outcomes = join_all(lookups).await;

        let total = outcomes.len();
        let mut failures = 0usize;
        let mut batches = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(items) => batches.push(items),
                Err(e) => {
                    failures += 1;
                    debug!("curated lookup failed: {}", e);
                }
            }
        }

        if failures == total {
            return None;
        }
        let unique = dedupe_and_tag(batches);

        info!(
            "curated '{}': {} titles -> {} unique volumes ({} lookups failed)",
            genre,
            total,
            unique.len(),
            failures
        );
        Some(unique)
    }

    /// Fetch for a non-curated plan; failures degrade to empty.
    async fn fetch_planned(&self, plan: &QueryPlan) -> Vec<Volume> {
        let q = match plan {
            QueryPlan::Fiction { query } => query.clone(),
            QueryPlan::Subject { genre } => format!("subject:{}", genre),
            QueryPlan::Literal { query } => query.clone(),
            QueryPlan::Curated { .. } => unreachable!("curated plans use fetch_curated"),
        };

        let query = VolumeQuery::new(q, SEARCH_MAX_RESULTS).books().english();
        match self.catalog.search(&query).await {
            Ok(items) => items,
            Err(e) => {
                warn!("catalog search failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Flatten curated lookup batches into one list, first occurrence winning
/// on duplicate identifiers, every survivor tagged curated.
fn dedupe_and_tag(batches: Vec<Vec<Volume>>) -> Vec<Volume> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for mut volume in batches.into_iter().flatten() {
        if seen.insert(volume.id.clone()) {
            volume.is_curated = true;
            unique.push(volume);
        }
    }
    unique
}

/// Missing dates sort last; the catalog's date strings compare correctly
/// as plain text (YYYY or YYYY-MM-DD).
fn published_date_key(volume: &Volume) -> String {
    volume
        .volume_info
        .published_date
        .clone()
        .unwrap_or_else(|| "9999".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VolumeInfo;

    fn dated(id: &str, date: Option<&str>) -> Volume {
        Volume {
            id: id.to_string(),
            volume_info: VolumeInfo {
                published_date: date.map(str::to_string),
                ..Default::default()
            },
            search_info: None,
            is_curated: false,
        }
    }

    #[test]
    fn curated_batches_dedupe_by_id_first_wins() {
        let duplicated = dated("dupe", Some("2001"));
        let batches = vec![
            vec![duplicated.clone()],
            vec![dated("other", None), duplicated],
        ];

        let merged = dedupe_and_tag(batches);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|v| v.is_curated));
        assert_eq!(merged[0].id, "dupe");
        assert_eq!(merged[1].id, "other");
    }

    #[test]
    fn published_dates_sort_lexically_with_missing_last() {
        let mut items = vec![
            dated("undated", None),
            dated("newer", Some("2011-05-01")),
            dated("older", Some("1996")),
        ];
        items.sort_by(|a, b| published_date_key(a).cmp(&published_date_key(b)));

        let order: Vec<&str> = items.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(order, vec!["older", "newer", "undated"]);
    }
}
