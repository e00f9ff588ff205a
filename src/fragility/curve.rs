//! Lognormal fragility curve parameters.
//!
//! The probability that a component has reached **at least** a damage state at
//! intensity `x` is
//!
//! `P(DS ≥ ds | x) = Φ( ln(x / median) / dispersion )`
//!
//! where `Φ` is the standard normal CDF.

use serde::Serialize;

use crate::error::{FragilityError, FragilityResult};
use crate::math::standard_normal_cdf;

/// Parameters of one damage state's curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveParameters {
    /// Intensity measure type the curve is defined over (e.g. `PGA`).
    pub imt: String,
    /// Intensity at 50% exceedance probability.
    pub median: f64,
    /// Logarithmic standard deviation (β).
    pub dispersion: f64,
}

impl CurveParameters {
    pub fn new(imt: impl Into<String>, median: f64, dispersion: f64) -> FragilityResult<Self> {
        ensure_positive("median", median)?;
        ensure_positive("dispersion", dispersion)?;
        Ok(Self {
            imt: imt.into(),
            median,
            dispersion,
        })
    }

    /// Exceedance probability at `intensity`.
    pub fn exceedance(&self, intensity: f64) -> FragilityResult<f64> {
        calculate_state_probability(intensity, self.median, self.dispersion)
    }

    /// Exceedance for an intensity already checked to be finite and positive.
    pub(crate) fn exceedance_at(&self, intensity: f64) -> f64 {
        standard_normal_cdf((intensity / self.median).ln() / self.dispersion)
    }
}

/// Lognormal exceedance probability `Φ(ln(intensity / median) / dispersion)`.
///
/// All three inputs must be finite and strictly positive; anything else is an
/// `InvalidParameter` error rather than a NaN.
pub fn calculate_state_probability(
    intensity: f64,
    median: f64,
    dispersion: f64,
) -> FragilityResult<f64> {
    ensure_positive("intensity", intensity)?;
    ensure_positive("median", median)?;
    ensure_positive("dispersion", dispersion)?;
    Ok(standard_normal_cdf((intensity / median).ln() / dispersion))
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> FragilityResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FragilityError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exceedance_at_median_is_half() {
        for &m in &[0.01, 0.2, 1.0, 37.5] {
            for &b in &[0.1, 0.4, 1.3] {
                assert_eq!(calculate_state_probability(m, m, b).unwrap(), 0.5);
            }
        }
    }

    #[test]
    fn exceedance_reference_value() {
        // ln(0.3 / 0.2) / 0.4 = 1.01366...
        let p = calculate_state_probability(0.3, 0.2, 0.4).unwrap();
        assert!((p - 0.844_628_152_7).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn rejects_non_positive_and_non_finite_inputs() {
        let cases = [
            (0.0, 0.2, 0.4, "intensity"),
            (-1.0, 0.2, 0.4, "intensity"),
            (f64::NAN, 0.2, 0.4, "intensity"),
            (0.3, 0.0, 0.4, "median"),
            (0.3, f64::INFINITY, 0.4, "median"),
            (0.3, 0.2, 0.0, "dispersion"),
            (0.3, 0.2, -0.4, "dispersion"),
        ];
        for (x, m, b, field) in cases {
            match calculate_state_probability(x, m, b) {
                Err(FragilityError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("expected InvalidParameter({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn parameters_validate_on_construction() {
        assert!(CurveParameters::new("PGA", 0.2, 0.4).is_ok());
        assert!(CurveParameters::new("PGA", -0.2, 0.4).is_err());
        assert!(CurveParameters::new("PGA", 0.2, 0.0).is_err());
    }
}
