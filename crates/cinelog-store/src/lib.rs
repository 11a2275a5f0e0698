pub mod bus;
pub mod favorites;
pub mod kv;
pub mod profile;
pub mod reviews;
pub mod watchlist;

pub use bus::{ChangeBus, Subscription, Topic};
pub use favorites::FavoritesStore;
pub use kv::KvStore;
pub use profile::ProfileStore;
pub use reviews::ReviewStore;
pub use watchlist::WatchlistStore;
