//! Error kinds for the core, grouped by the stage that raises them.
//!
//! Data errors (config and consistency) are fatal at the boundary: the core
//! never attempts to repair malformed input. Solve errors propagate to the
//! caller, who decides whether to retry with a relaxed time limit or a
//! different backend.

use thiserror::Error;

/// Malformed or structurally invalid configuration: bad JSON shape, missing
/// keys, negative counts, a round below 1, an empty player/round set, or a
/// team-rules mapping missing a position.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what}: {reason}")]
    InvalidValue { what: String, reason: String },
}

/// A data-consistency problem discovered while joining the position-update
/// CSV against the player JSON, or while deriving per-round eligibility.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("position update CSV references unknown player name(s):\n{0}")]
    UnmatchedUpdateNames(String),

    #[error("player {player_id} ({player_name}) has no eligible positions in round {round}")]
    NoEligiblePositions {
        player_id: u64,
        player_name: String,
        round: u32,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures arising from handing the model to the MILP backend.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver proved the model infeasible")]
    Infeasible,

    #[error("solver backend unavailable or terminated abnormally: {0}")]
    Backend(String),

    #[error("time limit reached before optimality; best incumbent (if any) is still available")]
    TimeLimitExceeded,
}
