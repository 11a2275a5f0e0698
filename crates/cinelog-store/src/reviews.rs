use crate::bus::{ChangeBus, Topic};
use crate::kv::KvStore;
use chrono::{Local, Utc};
use cinelog_models::{Review, ReviewDraft, FALLBACK_AUTHOR};
use tracing::debug;

/// Authoritative collection key.
const ALL_KEY: &str = "reviews_all";

fn mirror_key(movie_id: &str) -> String {
    format!("reviews_{}", movie_id)
}

/// CRUD over the review collection plus the derived per-movie mirrors.
///
/// `reviews_all` is authoritative; `reviews_<movieId>` mirrors are recomputed
/// for the affected movie after each mutation and are only ever advisory.
/// Every mutation ends with a publish on [`Topic::Reviews`].
pub struct ReviewStore {
    kv: KvStore,
    bus: ChangeBus,
    default_author: Option<String>,
}

impl ReviewStore {
    pub fn new(kv: KvStore, bus: ChangeBus) -> Self {
        Self {
            kv,
            bus,
            default_author: None,
        }
    }

    /// Author used when a draft carries none. Threaded in from the profile at
    /// construction time instead of read ambiently on each save.
    pub fn with_default_author(mut self, author: Option<String>) -> Self {
        self.default_author = author.filter(|a| !a.trim().is_empty());
        self
    }

    /// Full collection, insertion order.
    pub fn get_all(&self) -> Vec<Review> {
        self.kv.read(ALL_KEY)
    }

    /// Reviews for one movie, answered from the authoritative collection.
    pub fn get_by_movie(&self, movie_id: &str) -> Vec<Review> {
        self.get_all()
            .into_iter()
            .filter(|r| r.movie_id == movie_id)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Review> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    /// The persisted per-movie mirror, read as-is. May lag the authoritative
    /// collection when a review was moved to a different movie.
    pub fn mirror(&self, movie_id: &str) -> Vec<Review> {
        self.kv.read(&mirror_key(movie_id))
    }

    /// Create or update a review and return the saved record.
    ///
    /// A draft whose `id` matches an existing record overwrites that record's
    /// mutable fields in place, preserving the id and refreshing the date. A
    /// draft without an id, or with an id that matches nothing, creates a new
    /// record with a freshly generated id.
    pub fn save(&self, draft: ReviewDraft) -> Review {
        let mut all = self.get_all();
        let date = current_date();
        let author = self.resolve_author(draft.author);

        if let Some(id) = draft.id.clone() {
            if let Some(existing) = all.iter_mut().find(|r| r.id == id) {
                existing.movie_id = draft.movie_id;
                existing.author = Some(author);
                existing.text = draft.text;
                existing.rating = draft.rating;
                existing.photo_base64 = draft.photo_base64;
                existing.date = date;
                let saved = existing.clone();
                debug!("Updated review {}", saved.id);
                self.persist(&all, &saved.movie_id);
                return saved;
            }
            debug!("Review id {} not found, creating a new record", id);
        }

        let review = Review {
            id: next_id(&all),
            movie_id: draft.movie_id,
            author: Some(author),
            text: draft.text,
            rating: draft.rating,
            date,
            photo_base64: draft.photo_base64,
        };
        all.push(review.clone());
        debug!("Created review {} for movie {}", review.id, review.movie_id);
        self.persist(&all, &review.movie_id);
        review
    }

    /// Remove the review with `id`. Unknown ids are a no-op; nothing is
    /// persisted or published for them.
    pub fn delete(&self, id: &str) {
        let mut all = self.get_all();
        let Some(pos) = all.iter().position(|r| r.id == id) else {
            debug!("Review id {} not found, nothing to delete", id);
            return;
        };
        let movie_id = all[pos].movie_id.clone();
        all.remove(pos);
        self.persist(&all, &movie_id);
    }

    fn resolve_author(&self, author: Option<String>) -> String {
        author
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.default_author.clone())
            .unwrap_or_else(|| FALLBACK_AUTHOR.to_string())
    }

    /// Write the authoritative collection, recompute the mirror for the one
    /// affected movie, then broadcast. Writes are best-effort, so the publish
    /// follows the completed attempt whether or not it stuck.
    fn persist(&self, all: &[Review], movie_id: &str) {
        self.kv.write(ALL_KEY, all);
        let for_movie: Vec<&Review> = all.iter().filter(|r| r.movie_id == movie_id).collect();
        self.kv.write(&mirror_key(movie_id), &for_movie);
        self.bus.publish(Topic::Reviews);
    }
}

fn current_date() -> String {
    Local::now().format("%-d/%-m/%Y").to_string()
}

/// Ids are decimal milliseconds since epoch, bumped upward until unique within
/// the collection. Good enough for human input rates; not cryptographic.
fn next_id(existing: &[Review]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while existing.iter().any(|r| r.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}
