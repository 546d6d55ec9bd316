//! Minimal command-line driver: loads the fixed data-file layout from a data
//! directory, runs the solve, writes the solution JSON and a markdown
//! report, and prints the solution to stdout.
//!
//! The data directory layout is fixed: `<data-dir>/players_final.json`,
//! `team_rules.json`, `rounds.json`, optional `position_updates.csv` and
//! `data_filter.json`.

mod config;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use retro_core::{ModelInputData, SolveError, SolveOptions};
use retro_data::{load_data_filter, load_players_from_json, load_rounds_from_json, load_team_rules_from_json, PlayerLoadOptions};

use config::Config;

/// Optimize a season in hindsight: which players to own, how to slot and
/// captain them, and which trades to make each round.
#[derive(Debug, Parser)]
#[command(name = "retro-fantasy", version, about)]
struct Args {
    /// Directory containing players_final.json, team_rules.json, rounds.json
    /// and the optional position_updates.csv / data_filter.json.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the TOML config file (solver time limit, output paths, log
    /// level). Missing file is not an error; defaults apply.
    #[arg(long, default_value = "retro.toml")]
    config: PathBuf,

    /// Overrides `solver.time_limit_seconds` from the config file.
    #[arg(long)]
    time_limit_seconds: Option<f64>,

    /// Overrides `output.solution_path` from the config file.
    #[arg(long)]
    output_solution: Option<PathBuf>,

    /// Overrides `output.report_path` from the config file.
    #[arg(long)]
    output_report: Option<PathBuf>,

    /// An unmatched eligibility-update CSV name is fatal instead of a
    /// warning.
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config(&args.config).context("loading config")?;
    init_logging(&config);
    debug!(?args, "parsed CLI arguments");

    let effective = Config {
        time_limit_seconds: args.time_limit_seconds.or(config.time_limit_seconds),
        output_solution_path: args.output_solution.unwrap_or(config.output_solution_path),
        output_report_path: args.output_report.unwrap_or(config.output_report_path),
        log_level: config.log_level,
    };

    let data = load_model_input(&args)?;
    info!(
        players = data.players.len(),
        rounds = data.rounds.len(),
        "loaded model input"
    );

    let options = SolveOptions {
        time_limit_seconds: effective.time_limit_seconds,
    };
    let solution = match retro_core::solve(&data, &options) {
        Ok(solution) => solution,
        Err(SolveError::Infeasible) => {
            anyhow::bail!("solver proved the model infeasible; no solution to report");
        }
        Err(err) => return Err(err).context("solving season optimization model"),
    };

    info!(objective = solution.objective_value, "solve complete");

    if let Some(parent) = effective.output_solution_path.parent() {
        std::fs::create_dir_all(parent).context("creating output directory")?;
    }
    let solution_json = serde_json::to_string_pretty(&solution).context("serializing solution")?;
    std::fs::write(&effective.output_solution_path, &solution_json)
        .with_context(|| format!("writing {}", effective.output_solution_path.display()))?;

    let report = retro_report::build_markdown_report(&solution);
    if let Some(parent) = effective.output_report_path.parent() {
        std::fs::create_dir_all(parent).context("creating report directory")?;
    }
    std::fs::write(&effective.output_report_path, &report)
        .with_context(|| format!("writing {}", effective.output_report_path.display()))?;

    println!("{solution_json}");
    Ok(())
}

fn init_logging(config: &Config) {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full");
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", &config.log_level);
    }
    tracing_subscriber::fmt::init();
}

fn load_model_input(args: &Args) -> Result<ModelInputData> {
    let team_rules =
        load_team_rules_from_json(args.data_dir.join("team_rules.json")).context("loading team_rules.json")?;

    let data_filter = load_data_filter(args.data_dir.join("data_filter.json")).context("loading data_filter.json")?;
    let (num_rounds, squad_id_filter) = match &data_filter {
        Some(filter) => (filter.num_rounds, filter.squad_ids.clone()),
        None => (None, None),
    };

    let rounds =
        load_rounds_from_json(args.data_dir.join("rounds.json"), num_rounds).context("loading rounds.json")?;

    let position_updates_csv = args.data_dir.join("position_updates.csv");
    let player_options = PlayerLoadOptions {
        position_updates_csv: position_updates_csv.exists().then_some(position_updates_csv),
        squad_id_filter,
        include_round0: false,
        strict_update_name_matching: args.strict,
    };
    let (players, unmatched) = load_players_from_json(args.data_dir.join("players_final.json"), &player_options)
        .context("loading players_final.json")?;
    for name in &unmatched {
        warn!(name = %name, "eligibility update CSV name did not match any player");
    }

    ModelInputData::new(players, rounds, team_rules).map_err(Into::into)
}
