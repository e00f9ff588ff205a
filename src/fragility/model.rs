//! `FragilityModel`: registry of curve families and the damage-state evaluator.
//!
//! Typical use:
//!
//! ```
//! use fragility_curves::fragility::FragilityModel;
//!
//! let mut model = FragilityModel::new("scenario-a");
//! model
//!     .set_fragility_curves(
//!         "Pipe",
//!         "PGA",
//!         &["minor", "moderate", "complete"],
//!         &[0.2, 0.4, 0.6],
//!         &[0.4, 0.4, 0.4],
//!     )
//!     .unwrap();
//!
//! let result = model.evaluate("Pipe12", "PGA", 0.3).unwrap();
//! assert_eq!(result.len(), 3);
//! assert!(result.total() <= 1.0);
//! ```
//!
//! Registration mutates the model and needs `&mut self`; every evaluation
//! borrows it immutably, so a fully registered model can be shared across
//! threads and queried concurrently.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{FragilityError, FragilityResult};
use crate::fragility::curve::ensure_positive;
use crate::fragility::describe::{
    CurveFamilySamples, CurvePoint, CurveSink, DEFAULT_SAMPLE_COUNT, SampleRange, sample_family,
};
use crate::fragility::family::CurveFamily;
use crate::fragility::key::{ComponentKey, StripDigits};
use crate::fragility::probability::{StateProbabilities, reduce_exceedances};

/// One independent evaluation in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub component: String,
    pub imt: String,
    pub intensity: f64,
}

impl EvaluationRequest {
    pub fn new(component: impl Into<String>, imt: impl Into<String>, intensity: f64) -> Self {
        Self {
            component: component.into(),
            imt: imt.into(),
            intensity,
        }
    }
}

#[derive(Clone)]
pub struct FragilityModel {
    name: String,
    applicable_components: BTreeSet<String>,
    families: BTreeMap<String, CurveFamily>,
    key_deriver: Arc<dyn ComponentKey>,
}

impl FragilityModel {
    /// Empty model using the default key rule (strip ASCII digits).
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_key_deriver(name, StripDigits)
    }

    pub fn with_key_deriver(name: impl Into<String>, deriver: impl ComponentKey + 'static) -> Self {
        Self {
            name: name.into(),
            applicable_components: BTreeSet::new(),
            families: BTreeMap::new(),
            key_deriver: Arc::new(deriver),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record which component-type prefixes this model claims to cover.
    ///
    /// Informational only: evaluation looks at registered families, not at this set.
    pub fn set_applicable_components<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_components = prefixes.into_iter().map(Into::into).collect();
    }

    pub fn applicable_components(&self) -> &BTreeSet<String> {
        &self.applicable_components
    }

    /// Whether `component`'s type key is in the applicable set.
    pub fn claims(&self, component: &str) -> bool {
        self.applicable_components
            .contains(&self.component_key(component))
    }

    /// Register (or replace) the curve family for `prefix`.
    ///
    /// The family is fully built and validated before it is stored; on error the
    /// model keeps whatever was registered for `prefix` before.
    pub fn set_fragility_curves<S: AsRef<str>>(
        &mut self,
        prefix: impl Into<String>,
        imt: &str,
        states: &[S],
        medians: &[f64],
        dispersions: &[f64],
    ) -> FragilityResult<()> {
        let prefix = prefix.into();
        let family = CurveFamily::build(&prefix, imt, states, medians, dispersions)?;

        if !family.is_uniformly_ordered() {
            warn!(
                "curve family '{prefix}' is not ordered by median with a shared dispersion; \
                 evaluations where curves cross will fail"
            );
        }
        debug!(
            "registered {} damage states for '{prefix}' ({imt}) in model '{}'",
            family.len(),
            self.name
        );

        self.families.insert(prefix, family);
        Ok(())
    }

    pub fn family(&self, prefix: &str) -> Option<&CurveFamily> {
        self.families.get(prefix)
    }

    /// Registered families in prefix order.
    pub fn families(&self) -> impl Iterator<Item = (&str, &CurveFamily)> {
        self.families.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Type key a component identifier is looked up under.
    pub fn component_key(&self, component: &str) -> String {
        self.key_deriver.derive(component)
    }

    fn lookup(&self, component: &str) -> FragilityResult<&CurveFamily> {
        let key = self.component_key(component);
        match self.families.get(&key) {
            Some(family) => Ok(family),
            None => Err(FragilityError::NotFound {
                component: component.to_string(),
                key,
            }),
        }
    }

    /// Probability of each damage state of `component` at `intensity`.
    ///
    /// Errors:
    /// - `InvalidParameter` if `intensity` is not finite and positive
    /// - `NotFound` if no family is registered for the component's key
    /// - `MeasureMismatch` if any state's curve uses another intensity measure
    /// - `NonMonotonic` if the family's curves cross at `intensity`
    pub fn evaluate(
        &self,
        component: &str,
        imt: &str,
        intensity: f64,
    ) -> FragilityResult<StateProbabilities> {
        ensure_positive("intensity", intensity)?;
        let family = self.lookup(component)?;
        let exceedances = family.exceedances(imt, intensity)?;
        let states = family.state_names().map(str::to_string).collect();
        let result = reduce_exceedances(states, exceedances, intensity)?;
        debug!(
            "evaluated '{component}' at {imt}={intensity}: {:?}",
            result.probabilities()
        );
        Ok(result)
    }

    /// Evaluate and, when a sink is given, hand it the sampled family over
    /// `(0.001, 2 × intensity)`.
    ///
    /// The sink only observes; the returned value is the same as `evaluate`.
    pub fn ascertain_damage_probabilities(
        &self,
        component: &str,
        imt: &str,
        intensity: f64,
        sink: Option<&mut dyn CurveSink>,
    ) -> FragilityResult<StateProbabilities> {
        let result = self.evaluate(component, imt, intensity)?;
        if let Some(sink) = sink {
            let range = SampleRange::around(intensity);
            let points = self.describe_curve_family(component, imt, DEFAULT_SAMPLE_COUNT, range)?;
            let samples = CurveFamilySamples::collect(imt, range, &result, points);
            sink.render(&samples);
        }
        Ok(result)
    }

    /// Lazily sample every state's curve at `sample_count` evenly spaced
    /// intensities over `range`.
    ///
    /// Points are yielded intensity-major, states in family order.
    pub fn describe_curve_family(
        &self,
        component: &str,
        imt: &str,
        sample_count: usize,
        range: SampleRange,
    ) -> FragilityResult<impl Iterator<Item = CurvePoint<'_>> + '_> {
        range.validate(sample_count)?;
        let family = self.lookup(component)?;
        family.check_measure(imt)?;
        Ok(sample_family(family, range, sample_count))
    }

    /// Evaluation plus the default family description, collected for a renderer.
    pub fn sample_curve_family(
        &self,
        component: &str,
        imt: &str,
        intensity: f64,
        sample_count: usize,
    ) -> FragilityResult<CurveFamilySamples> {
        let result = self.evaluate(component, imt, intensity)?;
        let range = SampleRange::around(intensity);
        let points = self.describe_curve_family(component, imt, sample_count, range)?;
        Ok(CurveFamilySamples::collect(imt, range, &result, points))
    }

    /// Evaluate independent requests in parallel; results keep request order.
    pub fn evaluate_many(
        &self,
        requests: &[EvaluationRequest],
    ) -> Vec<FragilityResult<StateProbabilities>> {
        requests
            .par_iter()
            .map(|r| self.evaluate(&r.component, &r.imt, r.intensity))
            .collect()
    }
}

impl std::fmt::Debug for FragilityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragilityModel")
            .field("name", &self.name)
            .field("applicable_components", &self.applicable_components)
            .field("families", &self.families)
            .finish_non_exhaustive()
    }
}
