//! Renders a [`SeasonSolution`] as a markdown report: a round-by-round
//! summary table, a trade ledger, and a chunked team timeline with one row
//! per player and one column per round.
//!
//! Cell formatting: a captain's score is bold, an uncounted player's score
//! is italic, and a round in which the player was traded out shows only the
//! sale price.

use std::collections::{BTreeMap, HashMap};

use retro_core::solution::{RoundDetail, SeasonSolution, TeamEntry};

/// How many round columns each team-timeline table holds before wrapping
/// into a new table.
const ROUNDS_PER_CHUNK: usize = 8;

struct Cell {
    score: f64,
    scored: bool,
    captain: bool,
    slot: Option<String>,
    position: Option<String>,
    price: Option<f64>,
    traded_out: bool,
}

fn format_score(score: f64) -> String {
    if (score - score.round()).abs() < 1e-9 {
        format!("{}", score.round() as i64)
    } else {
        let text = format!("{score:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn format_slot_position(slot: Option<&str>, position: Option<&str>) -> String {
    let Some(slot) = slot else { return String::new() };
    let slot_label = match slot {
        "on_field" => "ON",
        "bench" => "BENCH",
        "utility_bench" => "UTIL",
        other => other,
    };
    match position {
        Some(position) => format!("{position} / {slot_label}"),
        None => slot_label.to_string(),
    }
}

fn format_cell(cell: &Cell) -> String {
    let price_text = cell.price.map(format_price);

    if cell.traded_out {
        return match price_text {
            Some(price) => format!("{price}<br>Traded Out"),
            None => "Traded Out".to_string(),
        };
    }

    let mut score_text = format_score(cell.score);
    if cell.captain {
        score_text = format!("**{score_text}**");
    } else if !cell.scored {
        score_text = format!("*{score_text}*");
    }

    let where_text = format_slot_position(cell.slot.as_deref(), cell.position.as_deref());

    let mut parts = vec![score_text];
    if !where_text.is_empty() {
        parts.push(where_text);
    }
    if let Some(price) = price_text {
        parts.push(price);
    }
    parts.join("<br>")
}

/// Per-player, per-round cells plus stable display names, built from the
/// team listing and (for traded-out players, who are absent from their
/// exit round's team) the trade ledger.
fn collect_cells(solution: &SeasonSolution) -> (Vec<u32>, BTreeMap<u64, BTreeMap<u32, Cell>>, HashMap<u64, String>) {
    let round_numbers: Vec<u32> = solution.rounds.keys().copied().collect();
    let mut player_cells: BTreeMap<u64, BTreeMap<u32, Cell>> = BTreeMap::new();
    let mut player_names: HashMap<u64, String> = HashMap::new();

    for (&round, detail) in &solution.rounds {
        for entry in &detail.team {
            player_names.insert(entry.player_id, entry.player_name.clone());
            player_cells.entry(entry.player_id).or_default().insert(
                round,
                Cell {
                    score: entry.score,
                    scored: entry.scored,
                    captain: entry.captain,
                    slot: Some(entry.slot.clone()),
                    position: entry.position.clone(),
                    price: Some(entry.price),
                    traded_out: false,
                },
            );
        }

        if let Some(trades) = &detail.trades {
            for out_entry in &trades.traded_out {
                player_names.insert(out_entry.player_id, out_entry.player_name.clone());
                player_cells
                    .entry(out_entry.player_id)
                    .or_default()
                    .entry(round)
                    .or_insert(Cell {
                        score: 0.0,
                        scored: false,
                        captain: false,
                        slot: None,
                        position: None,
                        price: Some(out_entry.price),
                        traded_out: true,
                    });
            }
        }
    }

    (round_numbers, player_cells, player_names)
}

fn chunk_rounds(round_numbers: &[u32]) -> Vec<&[u32]> {
    round_numbers.chunks(ROUNDS_PER_CHUNK).collect()
}

/// Round-1 team order, then each subsequent round's traded-in order, then
/// any remaining players present in the block — a timeline reads as
/// "initial squad, then additions."
fn cascade_order(
    solution: &SeasonSolution,
    block: &[u32],
    player_cells: &BTreeMap<u64, BTreeMap<u32, Cell>>,
) -> Vec<u64> {
    let present: Vec<u64> = player_cells
        .iter()
        .filter(|(_, cells)| block.iter().any(|r| cells.contains_key(r)))
        .map(|(&pid, _)| pid)
        .collect();
    let present_set: std::collections::HashSet<u64> = present.iter().copied().collect();

    let mut ordered = Vec::new();
    let mut seen = std::collections::HashSet::new();

    if let Some(first_round) = solution.rounds.keys().next().copied() {
        if let Some(detail) = solution.rounds.get(&first_round) {
            for entry in &detail.team {
                if present_set.contains(&entry.player_id) && seen.insert(entry.player_id) {
                    ordered.push(entry.player_id);
                }
            }
        }
    }

    for &round in block {
        if let Some(detail) = solution.rounds.get(&round) {
            if let Some(trades) = &detail.trades {
                for entry in &trades.traded_in {
                    if present_set.contains(&entry.player_id) && seen.insert(entry.player_id) {
                        ordered.push(entry.player_id);
                    }
                }
            }
        }
    }

    for &pid in &present {
        if seen.insert(pid) {
            ordered.push(pid);
        }
    }

    ordered
}

fn render_round_summary_table(solution: &SeasonSolution) -> String {
    let mut out = String::from("## Round Summaries\n\n");
    out.push_str("| Round | Points | Captain | Bank | Team Value | Total Value |\n");
    out.push_str("|---|---:|---|---:|---:|---:|\n");
    for detail in solution.rounds.values() {
        let s = &detail.summary;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            s.round_number,
            format_score(s.total_team_points),
            s.captain_player_name,
            format_price(s.bank_balance),
            format_price(s.team_value),
            format_price(s.total_value),
        ));
    }
    out.push('\n');
    out
}

fn render_trades_table(solution: &SeasonSolution) -> String {
    let trade_rounds: Vec<&RoundDetail> = solution
        .rounds
        .values()
        .filter(|d| d.trades.as_ref().is_some_and(|t| !t.traded_in.is_empty() || !t.traded_out.is_empty()))
        .collect();
    if trade_rounds.is_empty() {
        return String::new();
    }

    let mut out = String::from("## Trades\n\n");
    out.push_str("| Round | Traded In | Traded Out |\n");
    out.push_str("|---|---|---|\n");
    for detail in trade_rounds {
        let trades = detail.trades.as_ref().expect("filtered to rounds with trades");
        let traded_in = trades
            .traded_in
            .iter()
            .map(|e| format!("{} ({})", e.player_name, format_price(e.price)))
            .collect::<Vec<_>>()
            .join(", ");
        let traded_out = trades
            .traded_out
            .iter()
            .map(|e| format!("{} ({})", e.player_name, format_price(e.price)))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("| {} | {} | {} |\n", detail.summary.round_number, traded_in, traded_out));
    }
    out.push('\n');
    out
}

fn render_team_timeline(solution: &SeasonSolution) -> String {
    let (round_numbers, player_cells, player_names) = collect_cells(solution);
    if round_numbers.is_empty() {
        return String::new();
    }

    let mut out = String::from("## Team Timeline\n\n");
    for block in chunk_rounds(&round_numbers) {
        out.push_str("| Player |");
        for &round in block {
            out.push_str(&format!(" R{round} |"));
        }
        out.push('\n');
        out.push_str("|---|");
        for _ in block {
            out.push_str("---|");
        }
        out.push('\n');

        for player_id in cascade_order(solution, block, &player_cells) {
            let name = player_names.get(&player_id).cloned().unwrap_or_default();
            out.push_str(&format!("| {name} |"));
            for &round in block {
                let cell_text = player_cells
                    .get(&player_id)
                    .and_then(|cells| cells.get(&round))
                    .map(format_cell)
                    .unwrap_or_default();
                out.push_str(&format!(" {cell_text} |"));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Builds the full markdown report for a solved season.
pub fn build_markdown_report(solution: &SeasonSolution) -> String {
    let mut out = String::new();
    out.push_str("# Season Optimization Report\n\n");
    out.push_str(&format!("- **Status**: {}\n", solution.status));
    out.push_str(&format!("- **Objective value**: {}\n\n", format_score(solution.objective_value)));

    out.push_str(&render_round_summary_table(solution));
    out.push_str(&render_trades_table(solution));
    out.push_str(&render_team_timeline(solution));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_core::solution::{RoundSummary, RoundTrades, TradeEntry};
    use std::collections::BTreeMap;

    fn solo_round_solution() -> SeasonSolution {
        let mut rounds = BTreeMap::new();
        rounds.insert(
            1,
            RoundDetail {
                summary: RoundSummary {
                    round_number: 1,
                    total_team_points: 20.0,
                    captain_player_name: "A A".to_string(),
                    bank_balance: 980.0,
                    team_value: 20.0,
                    total_value: 1000.0,
                },
                trades: None,
                team: vec![TeamEntry {
                    player_id: 1,
                    player_name: "A A".to_string(),
                    slot: "on_field".to_string(),
                    position: Some("DEF".to_string()),
                    price: 20.0,
                    score: 10.0,
                    scored: true,
                    captain: true,
                }],
            },
        );
        SeasonSolution {
            status: "Optimal".to_string(),
            objective_value: 20.0,
            rounds,
        }
    }

    #[test]
    fn captain_score_is_rendered_bold() {
        let report = build_markdown_report(&solo_round_solution());
        assert!(report.contains("**10**"));
    }

    #[test]
    fn report_includes_round_summary_row() {
        let report = build_markdown_report(&solo_round_solution());
        assert!(report.contains("| 1 | 20 | A A |"));
    }

    #[test]
    fn price_formatting_inserts_thousands_separators() {
        assert_eq!(format_price(1_234_567.0), "$1,234,567");
        assert_eq!(format_price(980.0), "$980");
    }

    #[test]
    fn traded_out_cell_shows_only_price() {
        let mut rounds = BTreeMap::new();
        rounds.insert(
            1,
            RoundDetail {
                summary: RoundSummary {
                    round_number: 1,
                    total_team_points: 0.0,
                    captain_player_name: String::new(),
                    bank_balance: 0.0,
                    team_value: 0.0,
                    total_value: 0.0,
                },
                trades: None,
                team: vec![],
            },
        );
        rounds.insert(
            2,
            RoundDetail {
                summary: RoundSummary {
                    round_number: 2,
                    total_team_points: 0.0,
                    captain_player_name: String::new(),
                    bank_balance: 0.0,
                    team_value: 0.0,
                    total_value: 0.0,
                },
                trades: Some(RoundTrades {
                    traded_in: vec![],
                    traded_out: vec![TradeEntry {
                        player_id: 1,
                        player_name: "A A".to_string(),
                        price: 20.0,
                    }],
                }),
                team: vec![],
            },
        );
        let solution = SeasonSolution {
            status: "Optimal".to_string(),
            objective_value: 0.0,
            rounds,
        };

        let report = build_markdown_report(&solution);
        assert!(report.contains("$20<br>Traded Out"));
    }
}
