//! Small JSON-file reading helper shared by every loader in this crate.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;

pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}
