use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured catalog token.
pub const TOKEN_ENV: &str = "CINELOG_TMDB_TOKEN";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Bearer token for the catalog API. Empty until configured.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Size token used when building poster URLs.
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_language() -> String {
    "es-ES".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            language: default_language(),
        }
    }
}

impl CatalogConfig {
    /// Token with the environment override applied.
    pub fn resolved_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| Some(self.token.clone()).filter(|t| !t.trim().is_empty()))
    }

    pub fn is_configured(&self) -> bool {
        self.resolved_token().is_some()
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing config file means defaults; a present but malformed file is an
    /// error the caller should see.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                token: "test_token".to_string(),
                ..CatalogConfig::default()
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.token, "test_token");
        assert_eq!(loaded.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(loaded.catalog.poster_size, "w500");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        std::fs::write(&path, "[catalog]\ntoken = \"abc\"\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.token, "abc");
        assert_eq!(loaded.catalog.image_base_url, "https://image.tmdb.org/t/p");
        assert_eq!(loaded.catalog.language, "es-ES");
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let path = PathBuf::from("/definitely/not/here/config.toml");
        let loaded = Config::load_or_default(&path).unwrap();
        assert!(loaded.catalog.token.is_empty());
    }

    #[test]
    fn test_configured_only_with_token() {
        let config = CatalogConfig::default();
        assert!(!config.is_configured());

        let config = CatalogConfig {
            token: "abc".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.resolved_token().as_deref(), Some("abc"));
    }
}
