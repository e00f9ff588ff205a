//! Domain types used outside the core evaluator.
//!
//! This module defines:
//!
//! - the model file schema (`ModelFile`, `FamilyRecord`)
//! - evaluation exports (`EvaluationFile`, `StateRow`)
//! - resolved run configuration (`RunConfig`)

pub mod types;

pub use types::*;
