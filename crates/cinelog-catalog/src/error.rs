use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog token not configured (set it in config.toml or the CINELOG_TMDB_TOKEN environment variable)")]
    MissingToken,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}
