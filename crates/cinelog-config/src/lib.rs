pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config};
pub use paths::{base_path_override, PathManager};
