//! Evaluation pipeline behind `frag eval`; model path resolution is shared with the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! model file -> registration -> evaluation (+ optional plot) -> exports
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use std::path::{Path, PathBuf};

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::fragility::{
    CurveFamilySamples, CurveSink, FragilityModel, SampleRange, StateProbabilities,
};
use crate::plot::AsciiPlot;

/// Environment variable naming the default model file.
pub const MODEL_ENV: &str = "FRAGILITY_MODEL";

/// All computed outputs of a single `frag eval` run.
#[derive(Debug, Clone)]
pub struct EvalOutput {
    pub model: FragilityModel,
    pub result: StateProbabilities,
    /// Rendered ASCII plot when plotting was requested.
    pub plot: Option<String>,
}

/// Resolve the model path from an explicit flag or `FRAGILITY_MODEL`.
///
/// `.env` is loaded first so the variable can live next to the model files.
pub fn resolve_model_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dotenvy::dotenv().ok();
    std::env::var_os(MODEL_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| AppError::new(2, format!("No model file given: pass --model or set {MODEL_ENV} (.env).")))
}

/// Load the model and run one evaluation.
pub fn run_eval(config: &RunConfig) -> Result<EvalOutput, AppError> {
    let model = crate::io::read_model_json(&config.model_path)?;
    run_eval_with_model(model, config)
}

/// Evaluate against an already loaded model.
///
/// Every check (including the sample range used by the plot and the curve
/// export) runs before the first file is written.
pub fn run_eval_with_model(model: FragilityModel, config: &RunConfig) -> Result<EvalOutput, AppError> {
    let range = SampleRange::around(config.intensity);
    let result = model.evaluate(&config.component, &config.imt, config.intensity)?;
    if config.plot || config.export_curves.is_some() {
        range.validate(config.sample_count)?;
    }

    let plot = if config.plot {
        let points =
            model.describe_curve_family(&config.component, &config.imt, config.sample_count, range)?;
        let samples = CurveFamilySamples::collect(&config.imt, range, &result, points);
        let mut sink = AsciiPlot::new(config.plot_width, config.plot_height);
        sink.render(&samples);
        sink.into_output()
    } else {
        None
    };

    if let Some(path) = &config.export_result {
        let file = crate::io::evaluation_file(&model, &config.component, &config.imt, &result);
        crate::io::write_evaluation_json(path, &file)?;
    }
    if let Some(path) = &config.export_curves {
        let points =
            model.describe_curve_family(&config.component, &config.imt, config.sample_count, range)?;
        crate::io::write_curve_samples_csv(path, points)?;
    }

    Ok(EvalOutput { model, result, plot })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FragilityModel {
        let mut model = FragilityModel::new("pipeline");
        model
            .set_fragility_curves("Pump", "PGA", &["slight", "extensive"], &[0.3, 0.8], &[0.5, 0.5])
            .unwrap();
        model
    }

    fn config(plot: bool) -> RunConfig {
        RunConfig {
            model_path: PathBuf::from("unused.json"),
            component: "Pump2".to_string(),
            imt: "PGA".to_string(),
            intensity: 0.4,
            plot,
            plot_width: 40,
            plot_height: 12,
            sample_count: 50,
            export_result: None,
            export_curves: None,
        }
    }

    #[test]
    fn plot_is_optional_and_does_not_change_result() {
        let with_plot = run_eval_with_model(model(), &config(true)).unwrap();
        let without = run_eval_with_model(model(), &config(false)).unwrap();
        assert!(with_plot.plot.is_some());
        assert!(without.plot.is_none());
        assert_eq!(with_plot.result, without.result);
    }

    #[test]
    fn evaluation_errors_exit_with_code_three() {
        let mut cfg = config(false);
        cfg.imt = "SA(1.0)".to_string();
        let err = run_eval_with_model(model(), &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn plot_follows_requested_sample_count() {
        let mut coarse = config(true);
        coarse.sample_count = 2;
        let coarse = run_eval_with_model(model(), &coarse).unwrap();
        let fine = run_eval_with_model(model(), &config(true)).unwrap();
        assert_eq!(coarse.result, fine.result);
        assert_ne!(coarse.plot, fine.plot);
    }

    #[test]
    fn bad_sample_count_fails_before_any_export() {
        let export = std::env::temp_dir().join(format!("frag-pipeline-{}.json", std::process::id()));
        std::fs::remove_file(&export).ok();

        let mut cfg = config(false);
        cfg.sample_count = 1;
        cfg.export_result = Some(export.clone());
        cfg.export_curves = Some(export.with_extension("csv"));

        let err = run_eval_with_model(model(), &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!export.exists());
        assert!(!export.with_extension("csv").exists());
    }

    #[test]
    fn explicit_model_path_wins() {
        let p = resolve_model_path(Some(Path::new("models/a.json"))).unwrap();
        assert_eq!(p, PathBuf::from("models/a.json"));
    }
}
