use thiserror::Error;

/// Errors raised by fragility-curve registration and evaluation.
///
/// Every variant is local to a single call: a failed registration leaves the
/// previously registered family in place and evaluation never mutates the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FragilityError {
    /// No curve family is registered for the component's derived type key.
    #[error("No fragility curves registered for component '{component}' (type key '{key}')")]
    NotFound { component: String, key: String },

    /// A damage state's curve was registered for a different intensity measure.
    #[error(
        "Fragility curve for state '{state}' uses intensity measure '{expected}', not '{requested}'"
    )]
    MeasureMismatch {
        state: String,
        expected: String,
        requested: String,
    },

    #[error("Invalid {name}: {value} (must be finite and > 0)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Sample range [{start}, {end}] with {count} samples is not usable")]
    InvalidRange { start: f64, end: f64, count: usize },

    /// The per-state input sequences of a registration differ in length.
    #[error("Mismatched curve inputs: {states} states, {medians} medians, {dispersions} dispersions")]
    ShapeMismatch {
        states: usize,
        medians: usize,
        dispersions: usize,
    },

    #[error("A curve family needs at least one damage state (prefix '{prefix}')")]
    EmptyFamily { prefix: String },

    #[error("Damage state '{state}' appears more than once")]
    DuplicateState { state: String },

    /// A more severe state's exceedance lies above the remaining probability
    /// mass, so the curves cross at this intensity.
    #[error(
        "Exceedance for state '{state}' ({exceedance:.6}) exceeds the remaining probability ({remaining:.6}) at intensity {intensity}"
    )]
    NonMonotonic {
        state: String,
        intensity: f64,
        exceedance: f64,
        remaining: f64,
    },
}

pub type FragilityResult<T> = Result<T, FragilityError>;

/// Process-level error carrying the exit code used by the `frag` binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FragilityError> for AppError {
    fn from(err: FragilityError) -> Self {
        AppError::new(3, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragility_errors_map_to_exit_code_three() {
        let err = FragilityError::NotFound {
            component: "Pipe7".to_string(),
            key: "Pipe".to_string(),
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().contains("Pipe7"));
    }
}
