//! Reduction of cumulative exceedances to per-state probabilities.

use serde::Serialize;

use crate::error::{FragilityError, FragilityResult};

/// Result of one evaluation: mutually exclusive state probabilities.
///
/// Built by walking the exceedances in severity order with a running
/// remainder that starts at `1.0`:
///
/// ```text
/// p_i       = remaining - e_i
/// remaining = e_i
/// ```
///
/// `probabilities[0]` is therefore the mass below the first state's threshold
/// and `probabilities[i]` the mass between thresholds `i` and `i + 1`. The
/// final remainder (the most severe state's exceedance) is kept as `residual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateProbabilities {
    intensity: f64,
    states: Vec<String>,
    exceedances: Vec<f64>,
    probabilities: Vec<f64>,
    residual: f64,
}

impl StateProbabilities {
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Exceedance probability of each state at the evaluated intensity.
    pub fn exceedances(&self) -> &[f64] {
        &self.exceedances
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(state, probability)` pairs in family order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.states
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Remainder left after the last state: its exceedance probability.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Label of the largest entry; the earliest state wins ties.
    ///
    /// This is the key the entry is stored under, not the damage reached:
    /// see `bucket_label` for display.
    pub fn most_likely(&self) -> Option<&str> {
        self.most_likely_index().map(|i| self.states[i].as_str())
    }

    pub fn most_likely_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probabilities.iter().enumerate() {
            match best {
                Some((_, bp)) if p <= bp => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Interval of damage covered by `probabilities()[index]`.
    ///
    /// Entry `0` is below the first state (`< minor`); entry `i` has reached
    /// state `i - 1` but not state `i` (`minor (< moderate)`).
    pub fn bucket_label(&self, index: usize) -> Option<String> {
        let state = self.states.get(index)?;
        Some(match index.checked_sub(1) {
            None => format!("< {state}"),
            Some(prev) => format!("{} (< {state})", self.states[prev]),
        })
    }

    /// Interval covered by `residual()`, e.g. `>= complete`.
    pub fn residual_label(&self) -> Option<String> {
        self.states.last().map(|s| format!(">= {s}"))
    }
}

/// Reduce ordered exceedances to state probabilities.
///
/// Fails with `NonMonotonic` when an exceedance is larger than the previous
/// state's, i.e. the curves cross at `intensity`. Values are never clamped.
///
/// The remainder carried to the next state is its predecessor's raw
/// exceedance, so identical adjacent curves give exactly zero mass.
pub fn reduce_exceedances(
    states: Vec<String>,
    exceedances: Vec<f64>,
    intensity: f64,
) -> FragilityResult<StateProbabilities> {
    debug_assert_eq!(states.len(), exceedances.len());

    let mut remaining = 1.0_f64;
    let mut probabilities = Vec::with_capacity(exceedances.len());
    for (state, &e) in states.iter().zip(&exceedances) {
        if e > remaining {
            return Err(FragilityError::NonMonotonic {
                state: state.clone(),
                intensity,
                exceedance: e,
                remaining,
            });
        }
        probabilities.push(remaining - e);
        remaining = e;
    }

    Ok(StateProbabilities {
        intensity,
        states,
        exceedances,
        probabilities,
        residual: remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn running_remainder_partition() {
        let r = reduce_exceedances(names(&["a", "b", "c"]), vec![0.9, 0.5, 0.1], 1.0).unwrap();
        let p = r.probabilities();
        assert!((p[0] - 0.1).abs() < 1e-15);
        assert!((p[1] - 0.4).abs() < 1e-15);
        assert!((p[2] - 0.4).abs() < 1e-15);
        assert!((r.residual() - 0.1).abs() < 1e-15);
        assert!((r.total() + r.residual() - 1.0).abs() < 1e-15);
        assert_eq!(r.most_likely(), Some("b"));
    }

    #[test]
    fn equal_exceedances_give_zero_mass() {
        let r = reduce_exceedances(names(&["a", "b"]), vec![0.5, 0.5], 1.0).unwrap();
        assert_eq!(r.probabilities(), &[0.5, 0.0]);
    }

    #[test]
    fn equal_inexact_exceedances_give_zero_mass() {
        let r = reduce_exceedances(names(&["a", "b"]), vec![0.1, 0.1], 1.0).unwrap();
        assert_eq!(r.probabilities()[1], 0.0);
        assert_eq!(r.residual(), 0.1);
    }

    #[test]
    fn negligible_first_exceedance_keeps_later_states_valid() {
        let r = reduce_exceedances(names(&["a", "b", "c"]), vec![1e-17, 3e-28, 0.0], 0.005).unwrap();
        let p = r.probabilities();
        assert_eq!(p[0], 1.0 - 1e-17);
        assert_eq!(p[1], 1e-17 - 3e-28);
        assert_eq!(p[2], 3e-28);
        assert!(p.iter().all(|&v| v >= 0.0));
        assert_eq!(r.residual(), 0.0);
    }

    #[test]
    fn bucket_labels_name_the_damage_interval() {
        let r = reduce_exceedances(names(&["minor", "moderate"]), vec![0.9, 0.2], 1.0).unwrap();
        assert_eq!(r.bucket_label(0).as_deref(), Some("< minor"));
        assert_eq!(r.bucket_label(1).as_deref(), Some("minor (< moderate)"));
        assert_eq!(r.bucket_label(2), None);
        assert_eq!(r.residual_label().as_deref(), Some(">= moderate"));
        assert_eq!(r.most_likely_index(), Some(1));
        assert_eq!(r.most_likely(), Some("moderate"));
    }

    #[test]
    fn crossing_curves_are_rejected() {
        let err = reduce_exceedances(names(&["a", "b"]), vec![0.3, 0.6], 2.0).unwrap_err();
        match err {
            FragilityError::NonMonotonic { state, intensity, .. } => {
                assert_eq!(state, "b");
                assert_eq!(intensity, 2.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn iter_pairs_states_with_probabilities() {
        let r = reduce_exceedances(names(&["x", "y"]), vec![0.75, 0.25], 0.5).unwrap();
        let pairs: Vec<(&str, f64)> = r.iter().collect();
        assert_eq!(pairs, vec![("x", 0.25), ("y", 0.5)]);
    }
}
