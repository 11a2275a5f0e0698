use crate::bus::{ChangeBus, Topic};
use crate::kv::KvStore;

const NAME_KEY: &str = "user_name";
const PHOTO_KEY: &str = "profile_photo_v1";

/// The two plain-string profile keys. The display name is not an identity; it
/// only decides which reviews count as "mine" in the profile view, which is
/// why renaming broadcasts [`Topic::Reviews`].
pub struct ProfileStore {
    kv: KvStore,
    bus: ChangeBus,
}

impl ProfileStore {
    pub fn new(kv: KvStore, bus: ChangeBus) -> Self {
        Self { kv, bus }
    }

    pub fn user_name(&self) -> Option<String> {
        self.kv.read_text(NAME_KEY).filter(|n| !n.trim().is_empty())
    }

    pub fn set_user_name(&self, name: &str) {
        self.kv.write_text(NAME_KEY, name);
        self.bus.publish(Topic::Reviews);
    }

    /// Inline-encoded avatar image, stored verbatim.
    pub fn avatar(&self) -> Option<String> {
        self.kv.read_text(PHOTO_KEY)
    }

    pub fn set_avatar(&self, data: &str) {
        self.kv.write_text(PHOTO_KEY, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store() -> (TempDir, ChangeBus, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        let bus = ChangeBus::new();
        let profile = ProfileStore::new(kv, bus.clone());
        (dir, bus, profile)
    }

    #[test]
    fn test_name_round_trip() {
        let (_dir, _bus, profile) = store();
        assert_eq!(profile.user_name(), None);
        profile.set_user_name("Ana");
        assert_eq!(profile.user_name().as_deref(), Some("Ana"));
    }

    #[test]
    fn test_blank_name_counts_as_unset() {
        let (_dir, _bus, profile) = store();
        profile.set_user_name("   ");
        assert_eq!(profile.user_name(), None);
    }

    #[test]
    fn test_rename_publishes_reviews_topic() {
        let (_dir, bus, profile) = store();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let _sub = bus.subscribe(Topic::Reviews, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        profile.set_user_name("Ana");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_avatar_round_trip() {
        let (_dir, _bus, profile) = store();
        assert_eq!(profile.avatar(), None);
        profile.set_avatar("data:image/png;base64,AAAA");
        assert_eq!(profile.avatar().as_deref(), Some("data:image/png;base64,AAAA"));
    }
}
