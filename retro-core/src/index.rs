//! Derived views over [`ModelInputData`]: sorted identifiers, index tuples,
//! eligibility lookups, and score/price accessors with the documented
//! missing-data defaults.
//!
//! Everything here is computed once per solve and then only read.
//! Deterministic ordering is load-bearing: it fixes the MILP's variable
//! order, which (combined with a deterministic solver) makes solutions
//! reproducible across runs given identical inputs.

use std::collections::HashSet;

use rustc_hash::FxHashMap;

use crate::domain::{ModelInputData, Position};

/// Score for `(player, round)`. Defaults to `0.0` when the player has no
/// recorded data for that round.
pub fn score(data: &ModelInputData, player: u64, round: u32) -> f64 {
    data.players
        .get(&player)
        .and_then(|p| p.by_round.get(&round))
        .map(|info| info.score)
        .unwrap_or(0.0)
}

/// Price for `(player, round)`. Defaults to the salary cap (a prohibitive
/// price) when the player has no recorded data for that round, which
/// forces the optimizer to reject such players without making the model
/// infeasible.
pub fn price(data: &ModelInputData, player: u64, round: u32) -> f64 {
    data.players
        .get(&player)
        .and_then(|p| p.by_round.get(&round))
        .map(|info| info.price)
        .unwrap_or(data.team_rules.salary_cap)
}

/// Eligible positions for `(player, round)`. Falls back to the player's
/// `original_positions` when the player has no recorded data for that
/// round.
pub fn eligible_positions(data: &ModelInputData, player: u64, round: u32) -> HashSet<Position> {
    let Some(p) = data.players.get(&player) else {
        return HashSet::new();
    };
    p.by_round
        .get(&round)
        .map(|info| info.eligible_positions.clone())
        .unwrap_or_else(|| p.original_positions.clone())
}

/// Memoized index tuples and eligibility lookups over a [`ModelInputData`].
pub struct ModelIndex {
    pub player_ids: Vec<u64>,
    pub round_numbers: Vec<u32>,
    /// `round_numbers` minus its minimum, i.e. every round that has a
    /// predecessor. Named for the common case where the season starts at
    /// round 1, but defined relative to whatever round is actually first.
    pub rounds_excluding_1: Vec<u32>,
    pub idx_player_round: Vec<(u64, u32)>,
    pub idx_player_round_excluding_1: Vec<(u64, u32)>,
    pub idx_player_position_round: Vec<(u64, Position, u32)>,
    pub idx_eligible_player_position_round: Vec<(u64, Position, u32)>,
    eligibility_map: FxHashMap<(u64, Position, u32), bool>,
}

impl ModelIndex {
    pub fn build(data: &ModelInputData) -> Self {
        let mut player_ids: Vec<u64> = data.players.keys().copied().collect();
        player_ids.sort_unstable();

        let mut round_numbers: Vec<u32> = data.rounds.keys().copied().collect();
        round_numbers.sort_unstable();

        let first_round = round_numbers[0];
        let rounds_excluding_1: Vec<u32> = round_numbers.iter().copied().filter(|&r| r != first_round).collect();

        let idx_player_round: Vec<(u64, u32)> = player_ids
            .iter()
            .flat_map(|&p| round_numbers.iter().map(move |&r| (p, r)))
            .collect();

        let idx_player_round_excluding_1: Vec<(u64, u32)> = player_ids
            .iter()
            .flat_map(|&p| rounds_excluding_1.iter().map(move |&r| (p, r)))
            .collect();

        let idx_player_position_round: Vec<(u64, Position, u32)> = player_ids
            .iter()
            .flat_map(|&p| {
                Position::all()
                    .into_iter()
                    .flat_map(move |k| round_numbers.iter().map(move |&r| (p, k, r)))
            })
            .collect();

        let mut eligibility_map = FxHashMap::default();
        for &(p, k, r) in &idx_player_position_round {
            let eligible = eligible_positions(data, p, r).contains(&k);
            eligibility_map.insert((p, k, r), eligible);
        }

        let idx_eligible_player_position_round: Vec<(u64, Position, u32)> = idx_player_position_round
            .iter()
            .copied()
            .filter(|(p, k, r)| *eligibility_map.get(&(*p, *k, *r)).unwrap_or(&false))
            .collect();

        Self {
            player_ids,
            round_numbers,
            rounds_excluding_1,
            idx_player_round,
            idx_player_round_excluding_1,
            idx_player_position_round,
            idx_eligible_player_position_round,
            eligibility_map,
        }
    }

    pub fn is_eligible(&self, player: u64, position: Position, round: u32) -> bool {
        self.eligibility_map
            .get(&(player, position, round))
            .copied()
            .unwrap_or(false)
    }

    pub fn first_round(&self) -> u32 {
        self.round_numbers[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, PlayerRoundInfo, Round, TeamStructureRules};
    use std::collections::HashMap;

    fn minimal_data() -> ModelInputData {
        let mut on_field = HashMap::new();
        let mut bench = HashMap::new();
        for pos in Position::all() {
            on_field.insert(pos, 0);
            bench.insert(pos, 0);
        }
        let rules = TeamStructureRules::new(on_field, bench, 100.0, 0).unwrap();

        let mut p1 = Player::new(1, "A", "A", None, [Position::Def].into()).unwrap();
        p1.by_round.insert(
            1,
            PlayerRoundInfo::new(1, 10.0, 20.0, [Position::Def].into()).unwrap(),
        );

        let mut players = HashMap::new();
        players.insert(1, p1);

        let mut rounds = HashMap::new();
        rounds.insert(1, Round::new(1, 2, 1).unwrap());
        rounds.insert(2, Round::new(2, 2, 1).unwrap());

        ModelInputData::new(players, rounds, rules).unwrap()
    }

    #[test]
    fn missing_round_defaults_score_zero_price_salary_cap() {
        let data = minimal_data();
        assert_eq!(score(&data, 1, 2), 0.0);
        assert_eq!(price(&data, 1, 2), 100.0);
        assert_eq!(eligible_positions(&data, 1, 2), [Position::Def].into());
    }

    #[test]
    fn present_round_uses_recorded_values() {
        let data = minimal_data();
        assert_eq!(score(&data, 1, 1), 10.0);
        assert_eq!(price(&data, 1, 1), 20.0);
    }

    #[test]
    fn index_excludes_round_1_correctly() {
        let data = minimal_data();
        let idx = ModelIndex::build(&data);
        assert_eq!(idx.round_numbers, vec![1, 2]);
        assert_eq!(idx.rounds_excluding_1, vec![2]);
    }

    #[test]
    fn rounds_excluding_1_tracks_the_actual_first_round_when_season_starts_later() {
        let mut on_field = HashMap::new();
        let mut bench = HashMap::new();
        for pos in Position::all() {
            on_field.insert(pos, 0);
            bench.insert(pos, 0);
        }
        let rules = TeamStructureRules::new(on_field, bench, 100.0, 0).unwrap();

        let p1 = Player::new(1, "A", "A", None, [Position::Def].into()).unwrap();
        let mut players = HashMap::new();
        players.insert(1, p1);

        let mut rounds = HashMap::new();
        rounds.insert(2, Round::new(2, 2, 1).unwrap());
        rounds.insert(3, Round::new(3, 2, 1).unwrap());
        let data = ModelInputData::new(players, rounds, rules).unwrap();

        let idx = ModelIndex::build(&data);
        assert_eq!(idx.first_round(), 2);
        assert_eq!(idx.rounds_excluding_1, vec![3]);
        assert!(idx.idx_player_round_excluding_1.contains(&(1, 3)));
        assert!(!idx.idx_player_round_excluding_1.contains(&(1, 2)));
    }

    #[test]
    fn eligible_index_filters_ineligible_combinations() {
        let data = minimal_data();
        let idx = ModelIndex::build(&data);
        assert!(idx.is_eligible(1, Position::Def, 1));
        assert!(!idx.is_eligible(1, Position::Mid, 1));
        // round 2 falls back to original_positions, which is {Def}.
        assert!(idx.is_eligible(1, Position::Def, 2));
        assert!(!idx.is_eligible(1, Position::Fwd, 2));
    }
}
