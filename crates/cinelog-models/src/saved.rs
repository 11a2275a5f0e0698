use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lightweight reference to a catalog movie, as stored in the favorites and
/// watchlist collections. `title` and `poster_path` are cached at insertion
/// time and never refreshed, so they can go stale.
///
/// `poster_path` keeps the catalog's own field name; `addedAt` matches the
/// persisted blob layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedMovie {
    pub id: String,
    pub title: String,
    #[serde(rename = "poster_path", skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Insert draft for a favorites/watchlist entry. The store assigns `added_at`.
#[derive(Debug, Clone)]
pub struct MovieRef {
    pub id: String,
    pub title: String,
    pub poster_path: Option<String>,
}

impl MovieRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
        }
    }

    pub fn with_poster(mut self, poster_path: Option<String>) -> Self {
        self.poster_path = poster_path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_movie_round_trip() {
        let entry = SavedMovie {
            id: "603".to_string(),
            title: "The Matrix".to_string(),
            poster_path: Some("/abc.jpg".to_string()),
            added_at: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["poster_path"], "/abc.jpg");
        assert!(json.get("addedAt").is_some());

        let back: SavedMovie = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
