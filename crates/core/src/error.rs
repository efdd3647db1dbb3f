use std::path::PathBuf;

use thiserror::Error;

/// Problems with a [`crate::config::SiteConfig`].
///
/// Missing page elements are never errors; controllers whose elements are
/// absent are simply not built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stats.threshold must be in (0, 1], got {0}")]
    Threshold(f64),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("selector for {0} is empty")]
    EmptySelector(&'static str),
}
