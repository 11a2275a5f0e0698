use crate::bus::{ChangeBus, Topic};
use crate::kv::KvStore;
use chrono::Utc;
use cinelog_models::{MovieRef, SavedMovie};
use tracing::debug;

const KEY: &str = "watchlist_v1";

/// The `watchlist_v1` collection: movies queued for later, in insertion order.
/// Same uniqueness rules as favorites, but mutations broadcast
/// [`Topic::Watchlist`] so mounted views re-read.
pub struct WatchlistStore {
    kv: KvStore,
    bus: ChangeBus,
}

impl WatchlistStore {
    pub fn new(kv: KvStore, bus: ChangeBus) -> Self {
        Self { kv, bus }
    }

    pub fn get_all(&self) -> Vec<SavedMovie> {
        self.kv.read(KEY)
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = id.trim();
        self.get_all().iter().any(|m| m.id.trim() == id)
    }

    /// Append unless the id is already present.
    pub fn add(&self, movie: MovieRef) {
        let mut all = self.get_all();
        if all.iter().any(|m| m.id.trim() == movie.id.trim()) {
            debug!("Movie {} already in watchlist, skipping", movie.id);
            return;
        }
        all.push(SavedMovie {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            added_at: Utc::now(),
        });
        self.kv.write(KEY, &all);
        self.bus.publish(Topic::Watchlist);
    }

    /// Remove by id; absent ids are a no-op.
    pub fn remove(&self, id: &str) {
        let id = id.trim();
        let mut all = self.get_all();
        all.retain(|m| m.id.trim() != id);
        self.kv.write(KEY, &all);
        self.bus.publish(Topic::Watchlist);
    }

    pub fn clear(&self) {
        self.kv.write::<SavedMovie>(KEY, &[]);
        self.bus.publish(Topic::Watchlist);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store() -> (TempDir, WatchlistStore) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        (dir, WatchlistStore::new(kv, ChangeBus::new()))
    }

    #[test]
    fn test_double_add_keeps_one_entry() {
        let (_dir, watchlist) = store();
        watchlist.add(MovieRef::new("7", "X"));
        watchlist.add(MovieRef::new("7", "X"));

        let all = watchlist.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "7");
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let (_dir, watchlist) = store();
        watchlist.add(MovieRef::new("1", "First"));
        watchlist.add(MovieRef::new("2", "Second"));
        watchlist.add(MovieRef::new("3", "Third"));

        let ids: Vec<String> = watchlist.get_all().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_remove_on_empty_watchlist_is_noop() {
        let (_dir, watchlist) = store();
        watchlist.remove("7");
        assert!(watchlist.get_all().is_empty());
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let (_dir, watchlist) = store();
        watchlist.add(MovieRef::new("1", "A"));
        watchlist.add(MovieRef::new("2", "B"));
        watchlist.add(MovieRef::new("3", "C"));

        watchlist.remove("2");

        let ids: Vec<String> = watchlist.get_all().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_mutations_publish_watchlist_topic() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        let bus = ChangeBus::new();
        let watchlist = WatchlistStore::new(kv, bus.clone());

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let _sub = bus.subscribe(Topic::Watchlist, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        watchlist.add(MovieRef::new("7", "X"));
        watchlist.remove("7");
        watchlist.clear();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
