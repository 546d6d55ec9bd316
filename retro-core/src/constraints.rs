//! Constraint construction, grouped by concern: slot composition,
//! squad-membership linking, counted-score selection, captaincy, the bank
//! recurrence, and trade semantics.
//!
//! Every `add_*` function consumes and returns the problem builder so
//! callers can chain them: `problem = add_slot_composition(problem, ...)`.
//! All sums range over the full index sets computed in [`crate::index`].

use good_lp::{constraint, Expression, SolverModel};

use crate::domain::{ModelInputData, Position};
use crate::index::{self, ModelIndex};
use crate::variables::DecisionVariables;

/// Adds every constraint family to `problem` and returns it.
pub fn add_all<M: SolverModel>(
    problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    let problem = add_slot_composition_constraints(problem, data, idx, dv);
    let problem = add_squad_membership_linking_constraints(problem, idx, dv);
    let problem = add_counted_score_selection_constraints(problem, data, idx, dv);
    let problem = add_captaincy_constraints(problem, idx, dv);
    let problem = add_initial_bank_balance_constraints(problem, data, idx, dv);
    let problem = add_bank_balance_recurrence_constraints(problem, data, idx, dv);
    let problem = add_trade_indicator_linking_constraints(problem, idx, dv);
    add_trade_quota_constraints(problem, data, idx, dv)
}

/// Slot composition, per round:
/// `Σ_p y_on[p,k,r] = on_field_required(k)`, `Σ_p y_bench[p,k,r] = bench_required(k)`,
/// `Σ_p y_util[p,r] = utility_bench_count`.
pub fn add_slot_composition_constraints<M: SolverModel>(
    mut problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &r in &idx.round_numbers {
        for k in Position::all() {
            let on_sum: Expression = idx
                .player_ids
                .iter()
                .filter_map(|&p| dv.y_on.get(&(p, k, r)))
                .map(|&v| v.into())
                .sum();
            let required = data.team_rules.on_field_required[&k] as f64;
            problem = problem.with(constraint!(on_sum == required));

            let bench_sum: Expression = idx
                .player_ids
                .iter()
                .filter_map(|&p| dv.y_bench.get(&(p, k, r)))
                .map(|&v| v.into())
                .sum();
            let required = data.team_rules.bench_required[&k] as f64;
            problem = problem.with(constraint!(bench_sum == required));
        }

        let util_sum: Expression = idx.player_ids.iter().map(|&p| dv.y_util[&(p, r)]).sum();
        problem = problem.with(constraint!(
            util_sum == data.team_rules.utility_bench_count as f64
        ));
    }
    problem
}

/// Squad-membership linking, per `(p, r)`:
/// `x[p,r] = Σ_k (y_on[p,k,r] + y_bench[p,k,r]) + y_util[p,r]`, and the
/// at-most-one-slot inequality (redundant given the equality above but kept
/// explicit for readability).
pub fn add_squad_membership_linking_constraints<M: SolverModel>(
    mut problem: M,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &(p, r) in &idx.idx_player_round {
        let mut slot_sum = Expression::default();
        for k in Position::all() {
            if let Some(&v) = dv.y_on.get(&(p, k, r)) {
                slot_sum += v;
            }
            if let Some(&v) = dv.y_bench.get(&(p, k, r)) {
                slot_sum += v;
            }
        }
        slot_sum += dv.y_util[&(p, r)];

        let x = dv.x[&(p, r)];
        problem = problem.with(constraint!(x == slot_sum.clone()));
        problem = problem.with(constraint!(slot_sum <= 1));
    }
    problem
}

/// Counted-score selection, per round: `Σ_p scored[p,r] = counted_onfield_players(r)`,
/// and per player `scored[p,r] <= Σ_k y_on[p,k,r]` (counted implies on-field).
pub fn add_counted_score_selection_constraints<M: SolverModel>(
    mut problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &r in &idx.round_numbers {
        let scored_sum: Expression = idx.player_ids.iter().map(|&p| dv.scored[&(p, r)]).sum();
        let counted = data.rounds[&r].counted_onfield_players as f64;
        problem = problem.with(constraint!(scored_sum == counted));

        for &p in &idx.player_ids {
            let on_sum: Expression = Position::all()
                .into_iter()
                .filter_map(|k| dv.y_on.get(&(p, k, r)))
                .map(|&v| v.into())
                .sum();
            problem = problem.with(constraint!(dv.scored[&(p, r)] <= on_sum));
        }
    }
    problem
}

/// Captaincy, per round: exactly one captain, and the captain must be
/// counted (`captain[p,r] <= scored[p,r]`).
pub fn add_captaincy_constraints<M: SolverModel>(mut problem: M, idx: &ModelIndex, dv: &DecisionVariables) -> M {
    for &r in &idx.round_numbers {
        let captain_sum: Expression = idx.player_ids.iter().map(|&p| dv.captain[&(p, r)]).sum();
        problem = problem.with(constraint!(captain_sum == 1));

        for &p in &idx.player_ids {
            problem = problem.with(constraint!(dv.captain[&(p, r)] <= dv.scored[&(p, r)]));
        }
    }
    problem
}

/// `bank[1] = salary_cap - Σ_p price(p,1)·x[p,1]`.
pub fn add_initial_bank_balance_constraints<M: SolverModel>(
    mut problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    let r1 = idx.first_round();
    let mut spend = Expression::default();
    for &p in &idx.player_ids {
        spend += dv.x[&(p, r1)] * index::price(data, p, r1);
    }
    let bank1 = dv.bank[&r1];
    problem = problem.with(constraint!(
        bank1 == data.team_rules.salary_cap - spend
    ));
    problem
}

/// `bank[r] = bank[r-1] + Σ_p price(p,r)·out[p,r] - Σ_p price(p,r)·in[p,r]`, r >= 2.
pub fn add_bank_balance_recurrence_constraints<M: SolverModel>(
    mut problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &r in &idx.rounds_excluding_1 {
        let prev = idx
            .round_numbers
            .iter()
            .rev()
            .find(|&&rr| rr < r)
            .copied()
            .expect("rounds_excluding_1 only contains rounds after the first one");

        let mut proceeds = Expression::default();
        let mut outlay = Expression::default();
        for &p in &idx.player_ids {
            let price_pr = index::price(data, p, r);
            proceeds += dv.traded_out[&(p, r)] * price_pr;
            outlay += dv.traded_in[&(p, r)] * price_pr;
        }

        let bank_r = dv.bank[&r];
        let bank_prev = dv.bank[&prev];
        problem = problem.with(constraint!(bank_r == bank_prev + proceeds - outlay));
    }
    problem
}

/// Trade-indicator linking, r >= 2, per player: six inequalities pinning
/// `in`/`out` to the change in `x`.
pub fn add_trade_indicator_linking_constraints<M: SolverModel>(
    mut problem: M,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &(p, r) in &idx.idx_player_round_excluding_1 {
        let prev = idx
            .round_numbers
            .iter()
            .rev()
            .find(|&&rr| rr < r)
            .copied()
            .expect("idx_player_round_excluding_1 only contains rounds after the first one");

        let x_r = dv.x[&(p, r)];
        let x_prev = dv.x[&(p, prev)];
        let in_pr = dv.traded_in[&(p, r)];
        let out_pr = dv.traded_out[&(p, r)];

        problem = problem.with(constraint!(in_pr >= x_r - x_prev));
        problem = problem.with(constraint!(in_pr <= x_r));
        problem = problem.with(constraint!(in_pr <= 1 - x_prev));

        problem = problem.with(constraint!(out_pr >= x_prev - x_r));
        problem = problem.with(constraint!(out_pr <= x_prev));
        problem = problem.with(constraint!(out_pr <= 1 - x_r));
    }
    problem
}

/// Trade quota, r >= 2: `Σ_p in[p,r] <= max_trades(r)`, `Σ_p out[p,r] <= max_trades(r)`.
pub fn add_trade_quota_constraints<M: SolverModel>(
    mut problem: M,
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
) -> M {
    for &r in &idx.rounds_excluding_1 {
        let max_trades = data.rounds[&r].max_trades as f64;

        let in_sum: Expression = idx.player_ids.iter().map(|&p| dv.traded_in[&(p, r)]).sum();
        problem = problem.with(constraint!(in_sum <= max_trades));

        let out_sum: Expression = idx.player_ids.iter().map(|&p| dv.traded_out[&(p, r)]).sum();
        problem = problem.with(constraint!(out_sum <= max_trades));
    }
    problem
}
