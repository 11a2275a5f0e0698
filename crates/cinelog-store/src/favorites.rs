use crate::kv::KvStore;
use chrono::Utc;
use cinelog_models::{MovieRef, SavedMovie};
use tracing::debug;

const KEY: &str = "favorites_v1";

/// The `favorites_v1` collection: movie references cached for later retrieval,
/// newest first. At most one entry per movie id; re-adding is a no-op and does
/// not refresh the cached display fields.
pub struct FavoritesStore {
    kv: KvStore,
}

impl FavoritesStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    pub fn get_all(&self) -> Vec<SavedMovie> {
        self.kv.read(KEY)
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = id.trim();
        self.get_all().iter().any(|m| m.id.trim() == id)
    }

    /// Insert at the front unless the id is already present.
    pub fn add(&self, movie: MovieRef) {
        let mut all = self.get_all();
        if all.iter().any(|m| m.id.trim() == movie.id.trim()) {
            debug!("Movie {} already in favorites, skipping", movie.id);
            return;
        }
        all.insert(
            0,
            SavedMovie {
                id: movie.id,
                title: movie.title,
                poster_path: movie.poster_path,
                added_at: Utc::now(),
            },
        );
        self.kv.write(KEY, &all);
    }

    /// Remove by id; absent ids are a no-op.
    pub fn remove(&self, id: &str) {
        let id = id.trim();
        let mut all = self.get_all();
        all.retain(|m| m.id.trim() != id);
        self.kv.write(KEY, &all);
    }

    pub fn clear(&self) {
        self.kv.write::<SavedMovie>(KEY, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FavoritesStore) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        (dir, FavoritesStore::new(kv))
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_dir, favorites) = store();
        favorites.add(MovieRef::new("7", "X"));
        favorites.add(MovieRef::new("7", "X"));
        assert_eq!(favorites.get_all().len(), 1);
    }

    #[test]
    fn test_readding_does_not_refresh_cached_fields() {
        let (_dir, favorites) = store();
        favorites.add(MovieRef::new("7", "Original title"));
        favorites.add(MovieRef::new("7", "Renamed title"));
        assert_eq!(favorites.get_all()[0].title, "Original title");
    }

    #[test]
    fn test_newest_entry_comes_first() {
        let (_dir, favorites) = store();
        favorites.add(MovieRef::new("1", "First"));
        favorites.add(MovieRef::new("2", "Second"));

        let titles: Vec<String> = favorites.get_all().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn test_contains_normalizes_whitespace() {
        let (_dir, favorites) = store();
        favorites.add(MovieRef::new("42", "X"));
        assert!(favorites.contains("42"));
        assert!(favorites.contains(" 42 "));
        assert!(!favorites.contains("43"));
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, favorites) = store();
        favorites.add(MovieRef::new("1", "A"));
        favorites.add(MovieRef::new("2", "B"));

        favorites.remove("1");
        assert_eq!(favorites.get_all().len(), 1);
        assert!(!favorites.contains("1"));

        favorites.clear();
        assert!(favorites.get_all().is_empty());
    }

    #[test]
    fn test_remove_on_empty_store_is_noop() {
        let (_dir, favorites) = store();
        favorites.remove("7");
        assert!(favorites.get_all().is_empty());
    }
}
