//! Loads `players_final.json` into validated [`retro_core::Player`] values,
//! folding in the cumulative position-eligibility updates.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use retro_core::{DataError, Player, PlayerRoundInfo, Position};

use crate::eligibility_updates::{read_position_updates_csv, UpdatesByName};
use crate::error::LoadError;
use crate::file::read_json;
use crate::positions::positions_from_codes;

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: u64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    squad_id: Option<u64>,
    #[serde(default)]
    original_positions: Vec<i64>,
    #[serde(default)]
    positions: Vec<i64>,
    #[serde(default)]
    stats: RawStats,
}

#[derive(Debug, Default, Deserialize)]
struct RawStats {
    #[serde(default)]
    scores: HashMap<String, f64>,
    #[serde(default)]
    prices: HashMap<String, f64>,
}

/// Controls the edges of [`load_players_from_json`]: which eligibility CSV
/// (if any) to fold in, whether to restrict to a subset of squads, whether
/// round 0 (pre-season) is kept, and how strictly CSV names must match.
#[derive(Debug, Default, Clone)]
pub struct PlayerLoadOptions {
    pub position_updates_csv: Option<PathBuf>,
    pub squad_id_filter: Option<HashSet<u64>>,
    pub include_round0: bool,
    /// When `true`, an eligibility-update name with no matching player is a
    /// fatal [`DataError::UnmatchedUpdateNames`]. When `false`, unmatched
    /// names are collected and returned alongside the players instead.
    pub strict_update_name_matching: bool,
}

/// Loads players from `path`, returning them keyed by `player_id` alongside
/// any eligibility-update names that didn't match a player (only populated
/// in non-strict mode).
pub fn load_players_from_json(
    path: impl AsRef<Path>,
    options: &PlayerLoadOptions,
) -> Result<(HashMap<u64, Player>, Vec<String>), LoadError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw: Vec<RawPlayer> = read_json(path)?;
    debug!(count = raw.len(), path = %path_str, "read raw player records");

    let position_updates: UpdatesByName = match &options.position_updates_csv {
        Some(csv_path) => {
            let updates = read_position_updates_csv(csv_path)?;
            debug!(players = updates.len(), path = %csv_path.display(), "loaded position-eligibility updates");
            updates
        }
        None => HashMap::new(),
    };

    let mut players: HashMap<u64, Player> = HashMap::new();

    for rec in raw {
        if let Some(filter) = &options.squad_id_filter {
            match rec.squad_id {
                Some(squad_id) if filter.contains(&squad_id) => {}
                _ => continue,
            }
        }

        let mut base_positions = positions_from_codes(&rec.original_positions, &path_str)?;
        if base_positions.is_empty() {
            base_positions = positions_from_codes(&rec.positions, &path_str)?;
        }

        let mut player = Player::new(rec.id, rec.first_name, rec.last_name, rec.squad_id, base_positions.clone())
            .map_err(DataError::Config)?;

        let player_updates = position_updates.get(&player.name());

        let mut round_keys: HashSet<u32> = HashSet::new();
        for key in rec.stats.scores.keys().chain(rec.stats.prices.keys()) {
            if let Ok(r) = key.parse::<u32>() {
                round_keys.insert(r);
            }
        }
        let mut round_keys: Vec<u32> = round_keys.into_iter().collect();
        round_keys.sort_unstable();

        for r in round_keys {
            if r == 0 && !options.include_round0 {
                continue;
            }

            let mut eligible_set: HashSet<Position> = base_positions.clone();
            if let Some(updates) = player_updates {
                for &(effective_round, position) in updates {
                    if r >= effective_round {
                        eligible_set.insert(position);
                    }
                }
            }

            if eligible_set.is_empty() {
                return Err(DataError::NoEligiblePositions {
                    player_id: player.player_id,
                    player_name: player.name(),
                    round: r,
                }
                .into());
            }

            let score = rec.stats.scores.get(&r.to_string()).copied().unwrap_or(0.0);
            let price = rec.stats.prices.get(&r.to_string()).copied().unwrap_or(0.0);

            let info = PlayerRoundInfo::new(r, score, price, eligible_set).map_err(DataError::Config)?;
            player.by_round.insert(r, info);
        }

        players.insert(player.player_id, player);
    }
    info!(loaded = players.len(), path = %path_str, "loaded players");

    let mut warnings = Vec::new();
    if options.position_updates_csv.is_some() && options.squad_id_filter.is_none() {
        let json_names: HashSet<String> = players.values().map(|p| p.name()).collect();
        let mut missing: Vec<&String> = position_updates
            .keys()
            .filter(|name| !json_names.contains(*name))
            .collect();
        missing.sort();

        if !missing.is_empty() {
            if options.strict_update_name_matching {
                let joined = missing.iter().map(|s| format!("- {s}")).collect::<Vec<_>>().join("\n");
                return Err(DataError::UnmatchedUpdateNames(joined).into());
            }
            warnings = missing.into_iter().cloned().collect();
            warn!(count = warnings.len(), "eligibility update CSV names did not match any player");
        }
    }

    Ok((players, warnings))
}
