//! Loads `rounds.json`, optionally restricted to the first `num_rounds`
//! rounds.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use retro_core::{ConfigError, Round};

use crate::error::LoadError;
use crate::file::read_json;

#[derive(Debug, Deserialize)]
struct RawRound {
    number: u32,
    #[serde(default = "default_max_trades")]
    max_trades: u32,
    #[serde(default = "default_counted_onfield_players")]
    counted_onfield_players: u32,
}

fn default_max_trades() -> u32 {
    2
}

fn default_counted_onfield_players() -> u32 {
    22
}

pub fn load_rounds_from_json(
    path: impl AsRef<Path>,
    num_rounds: Option<u32>,
) -> Result<HashMap<u32, Round>, LoadError> {
    if let Some(n) = num_rounds {
        if n < 1 {
            return Err(ConfigError::InvalidValue {
                what: "num_rounds".into(),
                reason: "must be >= 1".into(),
            }
            .into());
        }
    }

    let raw: Vec<RawRound> = read_json(&path)?;
    let mut rounds = HashMap::new();
    for rec in raw {
        if let Some(n) = num_rounds {
            if rec.number > n {
                continue;
            }
        }
        let round = Round::new(rec.number, rec.max_trades, rec.counted_onfield_players)?;
        rounds.insert(round.number, round);
    }

    if rounds.is_empty() {
        return Err(ConfigError::InvalidValue {
            what: "rounds.json".into(),
            reason: "no rounds loaded".into(),
        }
        .into());
    }
    if num_rounds.is_some() && !rounds.contains_key(&1) {
        return Err(ConfigError::InvalidValue {
            what: "rounds.json".into(),
            reason: "filtered rounds did not include round 1, but rounds must start from 1".into(),
        }
        .into());
    }

    info!(rounds = rounds.len(), "loaded rounds");
    Ok(rounds)
}
