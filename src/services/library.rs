use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Badge, ChallengeProgress, ChallengeState, JournalData, JournalSection, Preferences,
    WishlistEntry,
};
use crate::services::store::BlobStore;

// Blob key names are contracts with existing stored data; do not rename.
const PREFERENCES_KEY: &str = "bookFinderPreferences";
const JOURNAL_KEY: &str = "bookFinderJournal";
const CHALLENGE_KEY: &str = "bookFinderChallenge";
const CHALLENGE_GOAL_KEY: &str = "bookFinderChallengeGoal";

const DEFAULT_GOAL: u32 = 10;
const DEFAULT_SECTION_TITLE: &str = "New Section";

/// Locally-persisted user state: preferences, wishlist/journal, and the
/// reading challenge. Every mutation is a whole-blob read-modify-write
/// against the injected store.
pub struct LibraryService {
    store: Arc<dyn BlobStore>,
    // One user session, but handler workers still need their
    // read-modify-writes serialized.
    write_lock: Mutex<()>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    // -- preferences --------------------------------------------------------

    pub fn preferences(&self) -> Preferences {
        self.read_blob(PREFERENCES_KEY)
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_blob(PREFERENCES_KEY, preferences)
    }

    // -- journal ------------------------------------------------------------

    pub fn journal(&self) -> JournalData {
        self.read_blob(JOURNAL_KEY)
    }

    pub fn add_wishlist_entry(&self, title: &str) -> Result<WishlistEntry> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut journal: JournalData = self.read_blob(JOURNAL_KEY);
        let entry = WishlistEntry {
            id: Uuid::new_v4(),
            title: title.to_string(),
        };
        journal.wishlist.push(entry.clone());
        self.write_blob(JOURNAL_KEY, &journal)?;
        info!("wishlist add: '{}'", title);
        Ok(entry)
    }

    pub fn remove_wishlist_entry(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut journal: JournalData = self.read_blob(JOURNAL_KEY);
        let before = journal.wishlist.len();
        journal.wishlist.retain(|entry| entry.id != id);
        if journal.wishlist.len() == before {
            return Ok(false);
        }
        self.write_blob(JOURNAL_KEY, &journal)?;
        Ok(true)
    }

    pub fn add_section(&self, title: Option<&str>) -> Result<JournalSection> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut journal: JournalData = self.read_blob(JOURNAL_KEY);
        let section = JournalSection {
            id: Uuid::new_v4(),
            title: title.unwrap_or(DEFAULT_SECTION_TITLE).to_string(),
            content: String::new(),
        };
        journal.sections.push(section.clone());
        self.write_blob(JOURNAL_KEY, &journal)?;
        Ok(section)
    }

    pub fn update_section(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<JournalSection>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut journal: JournalData = self.read_blob(JOURNAL_KEY);
        let Some(section) = journal.sections.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            section.title = title.to_string();
        }
        if let Some(content) = content {
            section.content = content.to_string();
        }
        let updated = section.clone();
        self.write_blob(JOURNAL_KEY, &journal)?;
        Ok(Some(updated))
    }

    pub fn remove_section(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut journal: JournalData = self.read_blob(JOURNAL_KEY);
        let before = journal.sections.len();
        journal.sections.retain(|section| section.id != id);
        if journal.sections.len() == before {
            return Ok(false);
        }
        self.write_blob(JOURNAL_KEY, &journal)?;
        Ok(true)
    }

    // -- challenge ----------------------------------------------------------

    pub fn challenge(&self) -> ChallengeProgress {
        let state: ChallengeState = self.read_blob(CHALLENGE_KEY);
        progress(&state, self.goal())
    }

    pub fn set_goal(&self, goal: u32) -> Result<ChallengeProgress> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_blob(CHALLENGE_GOAL_KEY, &goal)?;
        let mut state: ChallengeState = self.read_blob(CHALLENGE_KEY);
        // A lowered goal can put the reader over the line retroactively.
        if award_badges(&mut state, goal) {
            self.write_blob(CHALLENGE_KEY, &state)?;
        }
        info!("challenge goal set to {}", goal);
        Ok(progress(&state, goal))
    }

    pub fn log_book(&self) -> Result<ChallengeProgress> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let goal = self.goal();
        let mut state: ChallengeState = self.read_blob(CHALLENGE_KEY);
        state.read += 1;
        award_badges(&mut state, goal);
        self.write_blob(CHALLENGE_KEY, &state)?;
        info!("challenge: {} books read", state.read);
        Ok(progress(&state, goal))
    }

    pub fn reset_challenge(&self) -> Result<ChallengeProgress> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let state = ChallengeState::default();
        self.write_blob(CHALLENGE_KEY, &state)?;
        info!("challenge reset");
        Ok(progress(&state, self.goal()))
    }

    fn goal(&self) -> u32 {
        let goal: u32 = self.read_blob(CHALLENGE_GOAL_KEY);
        if goal == 0 {
            DEFAULT_GOAL
        } else {
            goal
        }
    }

    // -- blob plumbing ------------------------------------------------------

    /// Missing or corrupt blobs degrade to the type's default shape.
    fn read_blob<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.read(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("blob '{}' did not parse ({}), using defaults", key, e);
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!("blob '{}' unreadable ({}), using defaults", key, e);
                T::default()
            }
        }
    }

    fn write_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.write(key, &raw)
    }
}

/// Badge thresholds: first book, five books, goal reached. Awards persist
/// until the challenge is reset.
fn award_badges(state: &mut ChallengeState, goal: u32) -> bool {
    let mut changed = false;
    let mut award = |state: &mut ChallengeState, id: &str| {
        if !state.badges.iter().any(|b| b == id) {
            state.badges.push(id.to_string());
            changed = true;
        }
    };

    if state.read >= 1 {
        award(state, "first");
    }
    if state.read >= 5 {
        award(state, "five");
    }
    if state.read >= goal {
        award(state, "goal");
    }
    changed
}

fn progress(state: &ChallengeState, goal: u32) -> ChallengeProgress {
    let percent = ((state.read as f64 / goal as f64) * 100.0).round() as u32;
    let percent = percent.min(100);

    let message = if percent == 0 {
        "Let's get started!"
    } else if percent < 50 {
        "Great start! Keep going!"
    } else if percent < 100 {
        "Almost there! You got this!"
    } else {
        "You did it! Amazing!"
    };

    ChallengeProgress {
        goal,
        read: state.read,
        percent,
        message: message.to_string(),
        badges: state.badges.iter().filter_map(|id| badge(id)).collect(),
    }
}

fn badge(id: &str) -> Option<Badge> {
    let (label, description) = match id {
        "first" => ("First Steps", "Read 1 book"),
        "five" => ("Bookworm", "Read 5 books"),
        "goal" => ("Goal Crusher", "Hit your goal"),
        _ => return None,
    };
    Some(Badge {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;

    fn service() -> LibraryService {
        LibraryService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn preferences_default_when_missing_and_round_trip() {
        let library = service();
        assert!(library.preferences().genres.is_empty());

        let prefs = Preferences {
            reading_level: Some("3-5".to_string()),
            authors: "Kate DiCamillo".to_string(),
            genres: vec!["fantasy".to_string()],
            moods: vec![],
        };
        library.save_preferences(&prefs).unwrap();
        assert_eq!(library.preferences().authors, "Kate DiCamillo");
    }

    #[test]
    fn corrupt_blob_degrades_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.write(JOURNAL_KEY, "not json at all").unwrap();
        let library = LibraryService::new(store);
        assert!(library.journal().wishlist.is_empty());
    }

    #[test]
    fn wishlist_add_and_remove() {
        let library = service();
        let entry = library.add_wishlist_entry("The Hobbit").unwrap();
        assert_eq!(library.journal().wishlist.len(), 1);

        assert!(library.remove_wishlist_entry(entry.id).unwrap());
        assert!(!library.remove_wishlist_entry(entry.id).unwrap());
        assert!(library.journal().wishlist.is_empty());
    }

    #[test]
    fn sections_update_and_delete() {
        let library = service();
        let section = library.add_section(None).unwrap();
        assert_eq!(section.title, DEFAULT_SECTION_TITLE);

        let updated = library
            .update_section(section.id, Some("Favorites"), Some("So far: Dune"))
            .unwrap()
            .expect("section exists");
        assert_eq!(updated.title, "Favorites");
        assert_eq!(updated.content, "So far: Dune");

        assert!(library.remove_section(section.id).unwrap());
        assert!(library.update_section(section.id, None, None).unwrap().is_none());
    }

    #[test]
    fn challenge_progress_caps_at_100_percent() {
        let library = service();
        library.set_goal(2).unwrap();
        library.log_book().unwrap();
        library.log_book().unwrap();
        let progress = library.log_book().unwrap();

        assert_eq!(progress.read, 3);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.message, "You did it! Amazing!");
    }

    #[test]
    fn badges_award_at_thresholds_once() {
        let library = service();
        library.set_goal(5).unwrap();

        let after_one = library.log_book().unwrap();
        assert_eq!(badge_ids(&after_one), vec!["first"]);

        for _ in 0..4 {
            library.log_book().unwrap();
        }
        let after_five = library.challenge();
        assert_eq!(badge_ids(&after_five), vec!["first", "five", "goal"]);
    }

    #[test]
    fn lowering_goal_awards_goal_badge() {
        let library = service();
        library.set_goal(50).unwrap();
        library.log_book().unwrap();
        library.log_book().unwrap();

        let progress = library.set_goal(2).unwrap();
        assert!(badge_ids(&progress).contains(&"goal".to_string()));
    }

    #[test]
    fn reset_clears_count_and_badges_but_not_goal() {
        let library = service();
        library.set_goal(3).unwrap();
        library.log_book().unwrap();

        let progress = library.reset_challenge().unwrap();
        assert_eq!(progress.read, 0);
        assert!(progress.badges.is_empty());
        assert_eq!(progress.goal, 3);
    }

    #[test]
    fn default_goal_is_ten() {
        let library = service();
        assert_eq!(library.challenge().goal, 10);
    }

    fn badge_ids(progress: &ChallengeProgress) -> Vec<String> {
        progress.badges.iter().map(|b| b.id.clone()).collect()
    }
}
