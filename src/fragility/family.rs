//! Curve families: the ordered damage states registered for one component type.

use std::collections::HashSet;

use log::warn;
use serde::Serialize;

use crate::error::{FragilityError, FragilityResult};
use crate::fragility::curve::{CurveParameters, ensure_positive};

/// One damage state and its curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageState {
    pub name: String,
    pub params: CurveParameters,
}

/// Damage states of a component type, ordered by increasing severity.
///
/// The curves are expected to be nested: at every intensity a more severe
/// state's exceedance lies at or below the previous state's. Registration does
/// not enforce this; evaluation reports a violation as `NonMonotonic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveFamily {
    states: Vec<DamageState>,
}

impl CurveFamily {
    /// Build a family from parallel per-state sequences sharing one IMT.
    pub fn build<S: AsRef<str>>(
        prefix: &str,
        imt: &str,
        states: &[S],
        medians: &[f64],
        dispersions: &[f64],
    ) -> FragilityResult<Self> {
        if states.len() != medians.len() || states.len() != dispersions.len() {
            return Err(FragilityError::ShapeMismatch {
                states: states.len(),
                medians: medians.len(),
                dispersions: dispersions.len(),
            });
        }
        if states.is_empty() {
            return Err(FragilityError::EmptyFamily {
                prefix: prefix.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(states.len());
        let mut out = Vec::with_capacity(states.len());
        for ((state, &median), &dispersion) in states.iter().zip(medians).zip(dispersions) {
            let name = state.as_ref();
            if !seen.insert(name) {
                return Err(FragilityError::DuplicateState {
                    state: name.to_string(),
                });
            }
            out.push(DamageState {
                name: name.to_string(),
                params: CurveParameters::new(imt, median, dispersion)?,
            });
        }

        Ok(Self { states: out })
    }

    pub fn states(&self) -> &[DamageState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    /// Distinct intensity measure types used by the family, in state order.
    pub fn measures(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for s in &self.states {
            if !out.contains(&s.params.imt.as_str()) {
                out.push(&s.params.imt);
            }
        }
        out
    }

    /// Fail with `MeasureMismatch` on the first state not defined over `imt`.
    pub fn check_measure(&self, imt: &str) -> FragilityResult<()> {
        for s in &self.states {
            if s.params.imt != imt {
                warn!(
                    "fragility curve for state '{}' is not applicable for intensity measure '{}' (registered: '{}')",
                    s.name, imt, s.params.imt
                );
                return Err(FragilityError::MeasureMismatch {
                    state: s.name.clone(),
                    expected: s.params.imt.clone(),
                    requested: imt.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Per-state exceedance probabilities at `intensity`, in family order.
    pub fn exceedances(&self, imt: &str, intensity: f64) -> FragilityResult<Vec<f64>> {
        ensure_positive("intensity", intensity)?;
        self.check_measure(imt)?;
        self.states
            .iter()
            .map(|s| s.params.exceedance(intensity))
            .collect()
    }

    /// Sufficient condition for nested curves: equal dispersions and
    /// non-decreasing medians.
    ///
    /// Families failing this may still be nested over the intensities actually
    /// queried; the result is only used to warn at registration.
    pub fn is_uniformly_ordered(&self) -> bool {
        self.states.windows(2).all(|w| {
            let (a, b) = (&w[0].params, &w[1].params);
            a.dispersion == b.dispersion && a.median <= b.median
        })
    }
}
