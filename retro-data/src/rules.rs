//! Loads `team_rules.json`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use retro_core::{ConfigError, Position, TeamStructureRules};

use crate::error::LoadError;
use crate::file::read_json;

#[derive(Debug, Deserialize)]
struct RawPositionCounts {
    #[serde(rename = "DEF")]
    def: u32,
    #[serde(rename = "MID")]
    mid: u32,
    #[serde(rename = "RUC")]
    ruc: u32,
    #[serde(rename = "FWD")]
    fwd: u32,
}

impl From<RawPositionCounts> for HashMap<Position, u32> {
    fn from(raw: RawPositionCounts) -> Self {
        HashMap::from([
            (Position::Def, raw.def),
            (Position::Mid, raw.mid),
            (Position::Ruc, raw.ruc),
            (Position::Fwd, raw.fwd),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct RawTeamRules {
    salary_cap: f64,
    #[serde(default)]
    utility_bench_count: u32,
    on_field_required: RawPositionCounts,
    bench_required: RawPositionCounts,
}

pub fn load_team_rules_from_json(path: impl AsRef<Path>) -> Result<TeamStructureRules, LoadError> {
    let raw: RawTeamRules = read_json(path)?;
    let salary_cap = raw.salary_cap;
    let rules = TeamStructureRules::new(
        raw.on_field_required.into(),
        raw.bench_required.into(),
        salary_cap,
        raw.utility_bench_count,
    )
    .map_err(|e: ConfigError| e.into())?;
    info!(salary_cap, squad_size = rules.squad_size(), "loaded team rules");
    Ok(rules)
}
