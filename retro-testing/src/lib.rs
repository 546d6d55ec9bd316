//! Shared test fixtures and float-assertion helpers: thin, dependency-light,
//! and reused across every workspace member's test suite rather than
//! re-implemented per crate.

use std::collections::HashMap;

use assert_float_eq::assert_float_eq;

use retro_core::{Position, TeamStructureRules};

/// Asserts every element of `actual` is within `max_diff` (absolute) of the
/// corresponding element of `expected`.
pub fn assert_slice_f64_near(actual: &[f64], expected: &[f64], max_diff: f64) {
    assert_eq!(actual.len(), expected.len(), "slice length mismatch");
    for (index, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_float_eq!(a, e, abs <= max_diff, "index {index}: {a} vs {e}");
    }
}

/// Asserts every element of `actual` is within `max_relative` (a fraction,
/// e.g. `0.01` for 1%) of the corresponding element of `expected`.
pub fn assert_slice_f64_relative(actual: &[f64], expected: &[f64], max_relative: f64) {
    assert_eq!(actual.len(), expected.len(), "slice length mismatch");
    for (index, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_float_eq!(a, e, rel <= max_relative, "index {index}: {a} vs {e}");
    }
}

/// A [`TeamStructureRules`] with the same count at every position, handy for
/// scenarios that don't care about positional mix.
pub fn uniform_team_rules(on_field_per_position: u32, bench_per_position: u32, salary_cap: f64, utility_bench_count: u32) -> TeamStructureRules {
    let mut on_field = HashMap::new();
    let mut bench = HashMap::new();
    for pos in Position::all() {
        on_field.insert(pos, on_field_per_position);
        bench.insert(pos, bench_per_position);
    }
    TeamStructureRules::new(on_field, bench, salary_cap, utility_bench_count)
        .expect("fixture rules are always valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_assertion_accepts_small_differences() {
        assert_slice_f64_near(&[1.0, 2.0], &[1.0 + 1e-9, 2.0 - 1e-9], 1e-6);
    }

    #[test]
    fn relative_assertion_accepts_small_relative_differences() {
        assert_slice_f64_relative(&[100.5], &[100.0], 0.01);
    }

    #[test]
    fn uniform_rules_apply_same_counts_to_every_position() {
        let rules = uniform_team_rules(1, 2, 1_000.0, 1);
        for pos in Position::all() {
            assert_eq!(rules.on_field_required[&pos], 1);
            assert_eq!(rules.bench_required[&pos], 2);
        }
    }
}
