use serde::{Deserialize, Serialize};

/// One page of a paginated catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl MovieSummary {
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|d| d.len() >= 4).map(|d| &d[..4])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    // Present when appended to the details request.
    pub videos: Option<VideoList>,
    pub credits: Option<Credits>,
    pub recommendations: Option<Page<MovieSummary>>,
}

impl MovieDetails {
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|d| d.len() >= 4).map(|d| &d[..4])
    }

    /// First YouTube-hosted trailer, if the videos were fetched.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .as_ref()?
            .results
            .iter()
            .find(|v| v.site == "YouTube" && v.kind == "Trailer")
    }

    pub fn cast(&self) -> &[CastMember] {
        self.credits.as_ref().map_or(&[], |c| c.cast.as_slice())
    }

    pub fn recommendations(&self) -> &[MovieSummary] {
        self.recommendations.as_ref().map_or(&[], |r| r.results.as_slice())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_listing() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "poster_path": "/m.jpg",
                 "release_date": "1999-03-31", "vote_average": 8.2, "overview": "Neo."}
            ],
            "total_pages": 10,
            "total_results": 200
        }"#;

        let page: Page<MovieSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 603);
        assert_eq!(page.results[0].release_year(), Some("1999"));
    }

    #[test]
    fn test_details_with_appended_sections() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "Neo.",
            "poster_path": "/m.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "runtime": 136,
            "genres": [{"id": 28, "name": "Acción"}],
            "videos": {"results": [
                {"key": "abc", "name": "Teaser", "site": "YouTube", "type": "Teaser"},
                {"key": "def", "name": "Official Trailer", "site": "YouTube", "type": "Trailer"}
            ]},
            "credits": {"cast": [{"name": "Keanu Reeves", "character": "Neo", "profile_path": null}]},
            "recommendations": {"page": 1, "results": [], "total_pages": 0, "total_results": 0}
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres[0].name, "Acción");
        assert_eq!(details.trailer().map(|v| v.key.as_str()), Some("def"));
        assert_eq!(details.cast().len(), 1);
        assert!(details.recommendations().is_empty());
    }

    #[test]
    fn test_details_without_appended_sections() {
        let json = r#"{"id": 1, "title": "X", "poster_path": null, "backdrop_path": null,
                       "release_date": null, "runtime": null}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert!(details.trailer().is_none());
        assert!(details.cast().is_empty());
        assert_eq!(details.release_year(), None);
    }
}
