//! Fixed questionnaire vocabulary: reading levels, genres, and moods that
//! preferences refer to by id. Labels and level query terms double as
//! catalog query material.

/// A reading level choice with the catalog query term it contributes.
pub struct ReadingLevel {
    pub id: &'static str,
    pub label: &'static str,
    pub query: &'static str,
}

pub struct GenreOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub struct MoodOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub const READING_LEVELS: [ReadingLevel; 4] = [
    ReadingLevel {
        id: "k-2",
        label: "Grade K-2",
        query: "early reader",
    },
    ReadingLevel {
        id: "3-5",
        label: "Grade 3-5",
        query: "middle grade",
    },
    ReadingLevel {
        id: "6-8",
        label: "Grade 6-8",
        query: "young adult",
    },
    ReadingLevel {
        id: "hs",
        label: "High School / YA",
        query: "young adult novel",
    },
];

pub const GENRE_OPTIONS: [GenreOption; 11] = [
    GenreOption { id: "mystery", label: "Mystery" },
    GenreOption { id: "fantasy", label: "Fantasy" },
    GenreOption { id: "scifi", label: "Sci-Fi" },
    GenreOption { id: "realistic", label: "Realistic" },
    GenreOption { id: "historical", label: "Historical" },
    GenreOption { id: "biography", label: "Biography" },
    GenreOption { id: "graphic", label: "Graphic Novel" },
    GenreOption { id: "adventure", label: "Adventure" },
    GenreOption { id: "humor", label: "Humor" },
    GenreOption { id: "horror", label: "Horror" },
    GenreOption { id: "romance", label: "Romance" },
];

pub const MOOD_OPTIONS: [MoodOption; 6] = [
    MoodOption { id: "happy", label: "Happy" },
    MoodOption { id: "excited", label: "Excited" },
    MoodOption { id: "scared", label: "Scared" },
    MoodOption { id: "inspired", label: "Inspired" },
    MoodOption { id: "curious", label: "Curious" },
    MoodOption { id: "relaxed", label: "Relaxed" },
];

/// Subject label for a genre id. "Sci-Fi" reads badly in a `subject:`
/// filter, so that one id maps to the spelled-out genre name.
pub fn genre_subject_label(id: &str) -> Option<&'static str> {
    let option = GENRE_OPTIONS.iter().find(|g| g.id == id)?;
    if option.id == "scifi" {
        Some("science fiction")
    } else {
        Some(option.label)
    }
}

pub fn reading_level_query(id: &str) -> Option<&'static str> {
    READING_LEVELS
        .iter()
        .find(|level| level.id == id)
        .map(|level| level.query)
}

pub fn mood_label(id: &str) -> Option<&'static str> {
    MOOD_OPTIONS
        .iter()
        .find(|mood| mood.id == id)
        .map(|mood| mood.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scifi_id_maps_to_spelled_out_subject() {
        assert_eq!(genre_subject_label("scifi"), Some("science fiction"));
        assert_eq!(genre_subject_label("fantasy"), Some("Fantasy"));
        assert_eq!(genre_subject_label("unknown"), None);
    }

    #[test]
    fn reading_levels_resolve_query_terms() {
        assert_eq!(reading_level_query("k-2"), Some("early reader"));
        assert_eq!(reading_level_query("hs"), Some("young adult novel"));
        assert_eq!(reading_level_query("college"), None);
    }

    #[test]
    fn moods_resolve_labels() {
        assert_eq!(mood_label("excited"), Some("Excited"));
        assert_eq!(mood_label("bored"), None);
    }
}
