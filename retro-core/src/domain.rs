//! Pure domain model for the season optimizer: players, rounds, structural
//! rules, and the top-level container the rest of the core consumes.
//!
//! Nothing in this module performs I/O. Construction validates the
//! invariants documented in each type; once built, a value is immutable for
//! the remainder of the solve.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::ConfigError;

/// A playing position. Closed variant with a fixed iteration order
/// (DEF, MID, RUC, FWD) so variable and constraint construction is
/// deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Position {
    #[serde(rename = "DEF")]
    #[strum(serialize = "DEF")]
    Def,
    #[serde(rename = "MID")]
    #[strum(serialize = "MID")]
    Mid,
    #[serde(rename = "RUC")]
    #[strum(serialize = "RUC")]
    Ruc,
    #[serde(rename = "FWD")]
    #[strum(serialize = "FWD")]
    Fwd,
}

impl Position {
    /// All positions in the fixed canonical order.
    pub fn all() -> [Position; 4] {
        [Position::Def, Position::Mid, Position::Ruc, Position::Fwd]
    }
}

/// Round-level parameters: how many trades are allowed and how many
/// on-field players count toward the round total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub max_trades: u32,
    pub counted_onfield_players: u32,
}

impl Round {
    pub fn new(number: u32, max_trades: u32, counted_onfield_players: u32) -> Result<Self, ConfigError> {
        if number < 1 {
            return Err(ConfigError::InvalidValue {
                what: "Round.number".into(),
                reason: "must be >= 1".into(),
            });
        }
        Ok(Self {
            number,
            max_trades,
            counted_onfield_players,
        })
    }
}

/// All player information that varies by round.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRoundInfo {
    pub round_number: u32,
    pub score: f64,
    pub price: f64,
    pub eligible_positions: HashSet<Position>,
}

impl PlayerRoundInfo {
    pub fn new(
        round_number: u32,
        score: f64,
        price: f64,
        eligible_positions: HashSet<Position>,
    ) -> Result<Self, ConfigError> {
        if price < 0.0 {
            return Err(ConfigError::InvalidValue {
                what: "PlayerRoundInfo.price".into(),
                reason: "must be >= 0".into(),
            });
        }
        if eligible_positions.is_empty() {
            return Err(ConfigError::InvalidValue {
                what: "PlayerRoundInfo.eligible_positions".into(),
                reason: "must be non-empty".into(),
            });
        }
        Ok(Self {
            round_number,
            score,
            price,
            eligible_positions,
        })
    }
}

/// A player with round-varying information (score, price, eligibility).
#[derive(Debug, Clone)]
pub struct Player {
    pub player_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub squad_id: Option<u64>,
    pub original_positions: HashSet<Position>,
    pub by_round: HashMap<u32, PlayerRoundInfo>,
}

impl Player {
    pub fn new(
        player_id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        squad_id: Option<u64>,
        original_positions: HashSet<Position>,
    ) -> Result<Self, ConfigError> {
        if player_id == 0 {
            return Err(ConfigError::InvalidValue {
                what: "Player.player_id".into(),
                reason: "must be a positive integer".into(),
            });
        }
        Ok(Self {
            player_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            squad_id,
            original_positions,
            by_round: HashMap::new(),
        })
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Season/global team structure rules: how many players occupy each
/// positional slot, the salary cap, and the utility bench size.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStructureRules {
    pub on_field_required: HashMap<Position, u32>,
    pub bench_required: HashMap<Position, u32>,
    pub salary_cap: f64,
    pub utility_bench_count: u32,
}

impl TeamStructureRules {
    pub fn new(
        on_field_required: HashMap<Position, u32>,
        bench_required: HashMap<Position, u32>,
        salary_cap: f64,
        utility_bench_count: u32,
    ) -> Result<Self, ConfigError> {
        if salary_cap < 0.0 {
            return Err(ConfigError::InvalidValue {
                what: "TeamStructureRules.salary_cap".into(),
                reason: "must be >= 0".into(),
            });
        }
        for (name, mapping) in [
            ("on_field_required", &on_field_required),
            ("bench_required", &bench_required),
        ] {
            for pos in Position::all() {
                if !mapping.contains_key(&pos) {
                    return Err(ConfigError::InvalidValue {
                        what: name.into(),
                        reason: format!("missing position {pos}"),
                    });
                }
            }
        }
        Ok(Self {
            on_field_required,
            bench_required,
            salary_cap,
            utility_bench_count,
        })
    }

    /// Total squad size: on-field + bench + utility, summed across positions.
    pub fn squad_size(&self) -> u32 {
        self.on_field_required.values().sum::<u32>()
            + self.bench_required.values().sum::<u32>()
            + self.utility_bench_count
    }
}

/// Top-level container for all model input data. Built once per solve and
/// treated as read-only by every downstream component.
#[derive(Debug, Clone)]
pub struct ModelInputData {
    pub players: HashMap<u64, Player>,
    pub rounds: HashMap<u32, Round>,
    pub team_rules: TeamStructureRules,
}

impl ModelInputData {
    pub fn new(
        players: HashMap<u64, Player>,
        rounds: HashMap<u32, Round>,
        team_rules: TeamStructureRules,
    ) -> Result<Self, ConfigError> {
        if players.is_empty() {
            return Err(ConfigError::InvalidValue {
                what: "ModelInputData.players".into(),
                reason: "cannot be empty".into(),
            });
        }
        if rounds.is_empty() {
            return Err(ConfigError::InvalidValue {
                what: "ModelInputData.rounds".into(),
                reason: "cannot be empty".into(),
            });
        }
        Ok(Self {
            players,
            rounds,
            team_rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> TeamStructureRules {
        let mut on_field = HashMap::new();
        let mut bench = HashMap::new();
        for pos in Position::all() {
            on_field.insert(pos, 1);
            bench.insert(pos, 0);
        }
        TeamStructureRules::new(on_field, bench, 1_000.0, 1).unwrap()
    }

    #[test]
    fn squad_size_sums_onfield_bench_and_utility() {
        let rules = rules();
        assert_eq!(rules.squad_size(), 4 + 0 + 1);
    }

    #[test]
    fn team_rules_rejects_missing_position() {
        let mut on_field = HashMap::new();
        on_field.insert(Position::Def, 1);
        let mut bench = HashMap::new();
        for pos in Position::all() {
            bench.insert(pos, 0);
        }
        assert!(TeamStructureRules::new(on_field, bench, 0.0, 0).is_err());
    }

    #[test]
    fn player_round_info_rejects_empty_eligibility() {
        let result = PlayerRoundInfo::new(1, 10.0, 100.0, HashSet::new());
        assert!(result.is_err());
    }

    #[test]
    fn player_id_must_be_positive() {
        assert!(Player::new(0, "A", "B", None, HashSet::new()).is_err());
    }

    #[test]
    fn player_name_joins_first_and_last() {
        let player = Player::new(1, "Marcus", "Bontempelli", None, HashSet::new()).unwrap();
        assert_eq!(player.name(), "Marcus Bontempelli");
    }
}
