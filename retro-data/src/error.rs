//! Load-time error kind, wrapping the core's config/data errors with the
//! file path that was being read when the failure occurred.

use thiserror::Error;

use retro_core::{ConfigError, DataError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path} as CSV: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("unknown position code {code} in {path}")]
    UnknownPositionCode { path: String, code: i64 },

    #[error("unknown position string {value:?} in {path}")]
    UnknownPositionString { path: String, value: String },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
