//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - read from model JSON files
//! - written back out (model round trips, evaluation exports)
//! - passed between the CLI, the TUI, and the report/plot code

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk description of a fragility model (JSON).
///
/// Families are stored as parallel arrays, the same shape the registration
/// call takes, so loading replays every family through the model's validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub name: String,
    #[serde(default)]
    pub applicable_components: Vec<String>,
    pub families: Vec<FamilyRecord>,
}

/// One component type's curves in a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub prefix: String,
    /// Intensity measure type shared by all states (e.g. `PGA`).
    pub imt: String,
    /// Damage state labels, least to most severe.
    pub states: Vec<String>,
    pub medians: Vec<f64>,
    pub dispersions: Vec<f64>,
}

/// Exported result of a single evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationFile {
    pub tool: String,
    pub model: String,
    pub component: String,
    pub component_key: String,
    pub imt: String,
    pub intensity: f64,
    pub states: Vec<StateRow>,
    /// Exceedance of the most severe state (mass not assigned to any row).
    pub residual: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateRow {
    pub state: String,
    pub exceedance: f64,
    pub probability: f64,
}

/// A resolved `frag eval` run.
///
/// Derived from CLI flags plus environment defaults (`FRAGILITY_MODEL`).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model_path: PathBuf,
    pub component: String,
    pub imt: String,
    pub intensity: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Intensity samples per state for plots and curve exports.
    pub sample_count: usize,

    pub export_result: Option<PathBuf>,
    pub export_curves: Option<PathBuf>,
}
