//! Retrospective fantasy-season optimization: given historical per-round
//! player scores and prices, finds the team selection, captaincy, and trade
//! sequence across a season that maximizes total counted score under the
//! competition's squad and salary-cap rules.
//!
//! The pipeline is [`domain`] (validated input types) -> [`index`] (the
//! player/round/position index sets, including eligibility filtering) ->
//! [`variables`] (decision variables) -> [`objective`] + [`constraints`]
//! (the MILP) -> [`solver`] (hands the model to the backend) ->
//! [`solution`] (structured extraction of the result).

pub mod constraints;
pub mod domain;
pub mod error;
pub mod index;
pub mod objective;
pub mod solution;
pub mod solver;
pub mod variables;

pub use domain::{ModelInputData, Player, PlayerRoundInfo, Position, Round, TeamStructureRules};
pub use error::{ConfigError, DataError, SolveError};
pub use solution::SeasonSolution;
pub use solver::{solve, SolveOptions};
