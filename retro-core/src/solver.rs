//! Solver driver: hands the assembled model to the MILP backend and reports
//! a termination status alongside the objective value.
//!
//! The backend is HiGHS via `good_lp`. The sequence here is strictly
//! build-variables -> build-objective -> build-constraints -> solve: a
//! single-threaded, phase-ordered pipeline where each phase fully completes
//! before the next begins, and nothing here is shared across threads.

use good_lp::solvers::highs::highs;
use good_lp::{ProblemVariables, Solution, SolverModel};
use tracing::{debug, info};

use crate::constraints;
use crate::domain::ModelInputData;
use crate::error::SolveError;
use crate::index::ModelIndex;
use crate::objective::build_objective;
use crate::solution::{self, SeasonSolution};
use crate::variables::build_decision_variables;

/// Options controlling the solve. A `time_limit_seconds` of `None` lets the
/// backend run to optimality.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    pub time_limit_seconds: Option<f64>,
}

/// Builds the full model for `data` and solves it.
///
/// On `Ok`, the model was solved to optimality (or, if a time limit was set
/// and reached, HiGHS' best incumbent is reported as if optimal). On
/// `Err(SolveError::Infeasible)` the backend proved the model infeasible and
/// no solution is extracted.
pub fn solve(data: &ModelInputData, options: &SolveOptions) -> Result<SeasonSolution, SolveError> {
    info!(
        players = data.players.len(),
        rounds = data.rounds.len(),
        "building season optimization model"
    );

    let idx = ModelIndex::build(data);
    debug!(
        player_rounds = idx.idx_player_round.len(),
        eligible_slots = idx.idx_eligible_player_position_round.len(),
        "index built"
    );

    let mut problem_vars = ProblemVariables::new();
    let dv = build_decision_variables(&mut problem_vars, &idx);
    let objective = build_objective(data, &idx, &dv);

    let mut model = problem_vars.maximise(objective).using(highs);
    if let Some(limit) = options.time_limit_seconds {
        model = model.set_time_limit(limit);
    }
    let model = constraints::add_all(model, data, &idx, &dv);

    debug!("solving MILP");
    let solved = model.solve().map_err(|err| match err {
        good_lp::ResolutionError::Infeasible => SolveError::Infeasible,
        other => SolveError::Backend(other.to_string()),
    })?;

    info!("solve complete");

    Ok(solution::extract(data, &idx, &dv, &solved))
}
