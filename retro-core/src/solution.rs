//! Solution extraction: reads the solved model and produces a structured,
//! serializable, round-centric summary suitable for the output JSON contract.

use std::collections::BTreeMap;

use good_lp::Solution as GoodLpSolution;
use serde::Serialize;

use crate::domain::{ModelInputData, Position};
use crate::index::{self, ModelIndex};
use crate::variables::DecisionVariables;

const SELECTED_TOLERANCE: f64 = 1e-6;

fn is_selected<S: GoodLpSolution>(solution: &S, var: good_lp::Variable) -> bool {
    solution.value(var) >= 1.0 - SELECTED_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeEntry {
    pub player_id: u64,
    pub player_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundTrades {
    pub traded_in: Vec<TradeEntry>,
    pub traded_out: Vec<TradeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub total_team_points: f64,
    pub captain_player_name: String,
    pub bank_balance: f64,
    pub team_value: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamEntry {
    pub player_id: u64,
    pub player_name: String,
    pub slot: String,
    pub position: Option<String>,
    pub price: f64,
    pub score: f64,
    pub scored: bool,
    pub captain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundDetail {
    pub summary: RoundSummary,
    pub trades: Option<RoundTrades>,
    pub team: Vec<TeamEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSolution {
    pub status: String,
    pub objective_value: f64,
    pub rounds: BTreeMap<u32, RoundDetail>,
}

fn position_rank(position: Option<Position>) -> u8 {
    match position {
        Some(Position::Def) => 0,
        Some(Position::Mid) => 1,
        Some(Position::Ruc) => 2,
        Some(Position::Fwd) => 3,
        None => 4,
    }
}

fn slot_rank(slot: &str) -> u8 {
    match slot {
        "on_field" => 0,
        "bench" => 1,
        "utility_bench" => 2,
        _ => 3,
    }
}

fn extract_round_trades<S: GoodLpSolution>(
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
    solution: &S,
    round: u32,
) -> RoundTrades {
    let mut traded_in = Vec::new();
    let mut traded_out = Vec::new();

    for &p in &idx.player_ids {
        let player_name = data.players[&p].name();
        let price = index::price(data, p, round);

        if is_selected(solution, dv.traded_in[&(p, round)]) {
            traded_in.push(TradeEntry {
                player_id: p,
                player_name: player_name.clone(),
                price,
            });
        }
        if is_selected(solution, dv.traded_out[&(p, round)]) {
            traded_out.push(TradeEntry {
                player_id: p,
                player_name,
                price,
            });
        }
    }

    RoundTrades {
        traded_in,
        traded_out,
    }
}

fn extract_round_detail<S: GoodLpSolution>(
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
    solution: &S,
    round: u32,
) -> RoundDetail {
    let mut captain_player_name = String::new();
    let mut captain_bonus = 0.0;
    for &p in &idx.player_ids {
        if is_selected(solution, dv.captain[&(p, round)]) {
            captain_player_name = data.players[&p].name();
            captain_bonus = index::score(data, p, round);
            break;
        }
    }

    let mut total_team_points = captain_bonus;
    for &p in &idx.player_ids {
        if is_selected(solution, dv.scored[&(p, round)]) {
            total_team_points += index::score(data, p, round);
        }
    }

    let mut team_value = 0.0;
    let mut team: Vec<TeamEntry> = Vec::new();
    for &p in &idx.player_ids {
        let mut slot: Option<&str> = None;
        let mut position: Option<Position> = None;

        for k in Position::all() {
            if dv
                .y_on
                .get(&(p, k, round))
                .is_some_and(|&v| is_selected(solution, v))
            {
                slot = Some("on_field");
                position = Some(k);
                break;
            }
        }
        if slot.is_none() {
            for k in Position::all() {
                if dv
                    .y_bench
                    .get(&(p, k, round))
                    .is_some_and(|&v| is_selected(solution, v))
                {
                    slot = Some("bench");
                    position = Some(k);
                    break;
                }
            }
        }
        if slot.is_none() && is_selected(solution, dv.y_util[&(p, round)]) {
            slot = Some("utility_bench");
        }

        let Some(slot) = slot else { continue };

        let price = index::price(data, p, round);
        team_value += price;

        team.push(TeamEntry {
            player_id: p,
            player_name: data.players[&p].name(),
            slot: slot.to_string(),
            position: position.map(|pos| pos.to_string()),
            price,
            score: index::score(data, p, round),
            scored: is_selected(solution, dv.scored[&(p, round)]),
            captain: is_selected(solution, dv.captain[&(p, round)]),
        });
    }

    team.sort_by(|a, b| {
        let a_pos = a
            .position
            .as_deref()
            .and_then(|s| Position::all().into_iter().find(|p| p.to_string() == s));
        let b_pos = b
            .position
            .as_deref()
            .and_then(|s| Position::all().into_iter().find(|p| p.to_string() == s));
        position_rank(a_pos)
            .cmp(&position_rank(b_pos))
            .then(slot_rank(&a.slot).cmp(&slot_rank(&b.slot)))
            .then(b.price.partial_cmp(&a.price).unwrap())
    });

    let bank_balance = solution.value(dv.bank[&round]);
    let trades = if round == idx.first_round() {
        None
    } else {
        Some(extract_round_trades(data, idx, dv, solution, round))
    };

    RoundDetail {
        summary: RoundSummary {
            round_number: round,
            total_team_points,
            captain_player_name,
            bank_balance,
            team_value,
            total_value: bank_balance + team_value,
        },
        trades,
        team,
    }
}

/// Reads the solved model and builds the full season summary.
pub fn extract<S: GoodLpSolution>(
    data: &ModelInputData,
    idx: &ModelIndex,
    dv: &DecisionVariables,
    solution: &S,
) -> SeasonSolution {
    let mut rounds = BTreeMap::new();
    for &r in &idx.round_numbers {
        rounds.insert(r, extract_round_detail(data, idx, dv, solution, r));
    }

    let objective_value = rounds.values().map(|rd| rd.summary.total_team_points).sum();

    SeasonSolution {
        status: "Optimal".to_string(),
        objective_value,
        rounds,
    }
}
