use anyhow::Result;
use cinelog_catalog::{CatalogClient, CatalogError};
use cinelog_config::{Config, PathManager};
use cinelog_store::{ChangeBus, FavoritesStore, KvStore, ProfileStore, ReviewStore, WatchlistStore};

/// Everything a command needs: configuration, the storage scope and the
/// process-wide change bus. Stores are built on demand, each sharing the same
/// KV directory and bus handle.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub bus: ChangeBus,
    kv: KvStore,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        paths.ensure_directories()?;
        let config = Config::load_or_default(&paths.config_file())?;
        let kv = KvStore::open(paths.collections_dir())?;
        Ok(Self {
            config,
            paths,
            bus: ChangeBus::new(),
            kv,
        })
    }

    /// Review store with the saved profile name threaded in as the default
    /// author, so drafts without one fall back to it.
    pub fn reviews(&self) -> ReviewStore {
        ReviewStore::new(self.kv.clone(), self.bus.clone())
            .with_default_author(self.profile().user_name())
    }

    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::new(self.kv.clone())
    }

    pub fn watchlist(&self) -> WatchlistStore {
        WatchlistStore::new(self.kv.clone(), self.bus.clone())
    }

    pub fn profile(&self) -> ProfileStore {
        ProfileStore::new(self.kv.clone(), self.bus.clone())
    }

    pub fn catalog(&self) -> Result<CatalogClient, CatalogError> {
        CatalogClient::from_config(&self.config.catalog)
    }
}
