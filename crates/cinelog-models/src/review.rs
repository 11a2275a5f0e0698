use serde::{Deserialize, Serialize};

/// Display name stored when neither the draft nor the profile provides one.
pub const FALLBACK_AUTHOR: &str = "Anónimo";

/// A user's opinion on one movie. Lives in the `reviews_all` collection; the
/// per-movie mirrors hold copies of these same records.
///
/// Serialized field names match the persisted blob layout, which predates this
/// crate (`movieId`, `photoBase64`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub movie_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub text: String,
    pub rating: u8, // 1-5 stars
    /// Locale-formatted day/month/year, recomputed on every save.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_base64: Option<String>,
}

impl Review {
    /// Name to display for this review.
    pub fn display_author(&self) -> &str {
        self.author.as_deref().filter(|a| !a.is_empty()).unwrap_or(FALLBACK_AUTHOR)
    }
}

/// Input to `ReviewStore::save`. An `id` targets an existing record; without
/// one (or with an unknown one) a new record is created.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub id: Option<String>,
    pub movie_id: String,
    pub author: Option<String>,
    pub text: String,
    pub rating: u8,
    pub photo_base64: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_serializes_with_persisted_field_names() {
        let review = Review {
            id: "1700000000000".to_string(),
            movie_id: "42".to_string(),
            author: Some("Ana".to_string()),
            text: "great".to_string(),
            rating: 4,
            date: "7/8/2026".to_string(),
            photo_base64: None,
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["movieId"], "42");
        assert_eq!(json["rating"], 4);
        assert!(json.get("photoBase64").is_none());
        assert!(json.get("movie_id").is_none());
    }

    #[test]
    fn test_review_deserializes_without_optional_fields() {
        let json = r#"{"id":"1","movieId":"9","rating":5,"date":"1/1/2026"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.movie_id, "9");
        assert_eq!(review.text, "");
        assert_eq!(review.display_author(), FALLBACK_AUTHOR);
    }
}
