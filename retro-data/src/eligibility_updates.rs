//! Reads the position-eligibility-update CSV: `player, initial_position,
//! add_position, round`. Updates are cumulative: a player gains
//! `add_position` as eligible from `round` onward.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use retro_core::Position;

use crate::error::LoadError;
use crate::positions::parse_position_str;

pub type UpdatesByName = HashMap<String, Vec<(u32, Position)>>;

pub fn read_position_updates_csv(path: impl AsRef<Path>) -> Result<UpdatesByName, LoadError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path_str.clone(),
        source,
    })?;

    let mut updates: UpdatesByName = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path_str.clone(),
            source,
        })?;

        let name = record.get(0).unwrap_or("").trim();
        let add_position = record.get(2).unwrap_or("").trim();
        let round_str = record.get(3).unwrap_or("").trim();
        if name.is_empty() || add_position.is_empty() || round_str.is_empty() {
            continue;
        }

        let effective_round: u32 = round_str.parse().map_err(|_| LoadError::UnknownPositionString {
            path: path_str.clone(),
            value: format!("invalid round {round_str:?} for player {name}"),
        })?;
        let position = parse_position_str(add_position, &path_str)?;

        updates
            .entry(name.to_string())
            .or_default()
            .push((effective_round, position));
    }

    for entries in updates.values_mut() {
        entries.sort_by_key(|&(round, _)| round);
    }

    debug!(names = updates.len(), path = %path_str, "parsed position-eligibility update CSV");
    Ok(updates)
}
