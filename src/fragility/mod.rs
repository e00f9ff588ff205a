//! Lognormal fragility curves and damage-state probabilities.
//!
//! - `curve`: per-state parameters and the exceedance function
//! - `family`: ordered damage states of one component type
//! - `key`: component identifier -> family key
//! - `probability`: exceedance -> mutually exclusive state probabilities
//! - `describe`: lazy curve sampling for renderers
//! - `model`: the `FragilityModel` registry and evaluator

pub mod curve;
pub mod describe;
pub mod family;
pub mod key;
pub mod model;
pub mod probability;

pub use curve::*;
pub use describe::*;
pub use family::*;
pub use key::*;
pub use model::*;
pub use probability::*;
