//! Optional `data_filter.json`: restricts a solve to the first `num_rounds`
//! rounds and/or a subset of squad IDs, for building small problems out of a
//! full season's data.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::LoadError;
use crate::file::read_json;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataFilter {
    pub num_rounds: Option<u32>,
    pub squad_ids: Option<HashSet<u64>>,
}

#[derive(Debug, Deserialize)]
struct RawDataFilter {
    num_rounds: Option<u32>,
    #[serde(default)]
    squad_ids: Vec<u64>,
}

/// Reads `path` if it exists; returns `Ok(None)` (not an error) when absent,
/// since the filter is opt-in.
pub fn load_data_filter(path: impl AsRef<Path>) -> Result<Option<DataFilter>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let raw: RawDataFilter = read_json(path)?;
    let squad_ids = if raw.squad_ids.is_empty() {
        None
    } else {
        Some(raw.squad_ids.into_iter().collect())
    };

    let filter = DataFilter {
        num_rounds: raw.num_rounds,
        squad_ids,
    };
    debug!(?filter, path = %path.display(), "applying data filter");
    Ok(Some(filter))
}
