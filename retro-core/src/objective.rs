//! Objective construction: maximize counted score plus a captain bonus.

use good_lp::Expression;

use crate::domain::ModelInputData;
use crate::index::{self, ModelIndex};
use crate::variables::DecisionVariables;

/// `Σ_r Σ_p score(p,r)·scored[p,r] + Σ_r Σ_p score(p,r)·captain[p,r]`.
///
/// The captain term is a bonus on top of the counted score; combined with
/// the constraint `captain <= scored`, a captain's score is effectively
/// doubled.
pub fn build_objective(data: &ModelInputData, idx: &ModelIndex, dv: &DecisionVariables) -> Expression {
    let mut objective = Expression::default();
    for &(p, r) in &idx.idx_player_round {
        let s = index::score(data, p, r);
        objective += dv.scored[&(p, r)] * s;
        objective += dv.captain[&(p, r)] * s;
    }
    objective
}
