//! Decision-variable construction.
//!
//! Every binary family is indexed by the tuples computed in [`crate::index`].
//! `y_on`/`y_bench` are eligibility-filtered at construction: a
//! `(player, position, round)` combination that fails eligibility never gets
//! a variable, which is the primary mechanism enforcing position
//! eligibility.

use good_lp::{variable, ProblemVariables, Variable};
use rustc_hash::FxHashMap;

use crate::domain::Position;
use crate::index::ModelIndex;

/// All decision variables for a solve, keyed the same way the formulation
/// document indexes them.
pub struct DecisionVariables {
    /// `x[p,r]`: player p is in the squad in round r.
    pub x: FxHashMap<(u64, u32), Variable>,
    /// `y_on[p,k,r]`: player p fills an on-field slot of position k. Only
    /// present for eligible `(p,k,r)`.
    pub y_on: FxHashMap<(u64, Position, u32), Variable>,
    /// `y_bench[p,k,r]`: player p fills a bench slot of position k. Only
    /// present for eligible `(p,k,r)`.
    pub y_bench: FxHashMap<(u64, Position, u32), Variable>,
    /// `y_util[p,r]`: player p fills the utility bench slot.
    pub y_util: FxHashMap<(u64, u32), Variable>,
    /// `captain[p,r]`: p is captain this round.
    pub captain: FxHashMap<(u64, u32), Variable>,
    /// `scored[p,r]`: p's score is counted this round.
    pub scored: FxHashMap<(u64, u32), Variable>,
    /// `in[p,r]`, r >= 2: p is traded in at the start of round r.
    pub traded_in: FxHashMap<(u64, u32), Variable>,
    /// `out[p,r]`, r >= 2: p is traded out at the start of round r.
    pub traded_out: FxHashMap<(u64, u32), Variable>,
    /// `bank[r]`: continuous cash reserve after round r's trades.
    pub bank: FxHashMap<u32, Variable>,
}

pub fn build_decision_variables(vars: &mut ProblemVariables, idx: &ModelIndex) -> DecisionVariables {
    let mut x = FxHashMap::default();
    for &(p, r) in &idx.idx_player_round {
        x.insert((p, r), vars.add(variable().binary().name(format!("x_{p}_{r}"))));
    }

    let mut y_on = FxHashMap::default();
    let mut y_bench = FxHashMap::default();
    for &(p, k, r) in &idx.idx_eligible_player_position_round {
        y_on.insert(
            (p, k, r),
            vars.add(variable().binary().name(format!("y_on_{p}_{k}_{r}"))),
        );
        y_bench.insert(
            (p, k, r),
            vars.add(variable().binary().name(format!("y_bench_{p}_{k}_{r}"))),
        );
    }

    let mut y_util = FxHashMap::default();
    let mut captain = FxHashMap::default();
    let mut scored = FxHashMap::default();
    for &(p, r) in &idx.idx_player_round {
        y_util.insert((p, r), vars.add(variable().binary().name(format!("y_util_{p}_{r}"))));
        captain.insert((p, r), vars.add(variable().binary().name(format!("captain_{p}_{r}"))));
        scored.insert((p, r), vars.add(variable().binary().name(format!("scored_{p}_{r}"))));
    }

    let mut traded_in = FxHashMap::default();
    let mut traded_out = FxHashMap::default();
    for &(p, r) in &idx.idx_player_round_excluding_1 {
        traded_in.insert((p, r), vars.add(variable().binary().name(format!("in_{p}_{r}"))));
        traded_out.insert((p, r), vars.add(variable().binary().name(format!("out_{p}_{r}"))));
    }

    let mut bank = FxHashMap::default();
    for &r in &idx.round_numbers {
        bank.insert(r, vars.add(variable().min(0.0).name(format!("bank_{r}"))));
    }

    DecisionVariables {
        x,
        y_on,
        y_bench,
        y_util,
        captain,
        scored,
        traded_in,
        traded_out,
        bank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelInputData, Player, PlayerRoundInfo, Round, TeamStructureRules};
    use std::collections::HashMap;

    fn one_round_one_player() -> ModelInputData {
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

        ModelInputData::new(players, rounds, rules).unwrap()
    }

    #[test]
    fn ineligible_combinations_get_no_variable() {
        let data = one_round_one_player();
        let idx = ModelIndex::build(&data);
        let mut vars = ProblemVariables::new();
        let dv = build_decision_variables(&mut vars, &idx);

        assert!(dv.y_on.contains_key(&(1, Position::Def, 1)));
        assert!(!dv.y_on.contains_key(&(1, Position::Mid, 1)));
        assert!(!dv.y_bench.contains_key(&(1, Position::Fwd, 1)));
    }

    #[test]
    fn round_1_has_no_trade_variables() {
        let data = one_round_one_player();
        let idx = ModelIndex::build(&data);
        let mut vars = ProblemVariables::new();
        let dv = build_decision_variables(&mut vars, &idx);

        assert!(!dv.traded_in.contains_key(&(1, 1)));
        assert!(!dv.traded_out.contains_key(&(1, 1)));
        assert!(dv.bank.contains_key(&1));
    }
}
