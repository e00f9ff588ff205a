//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging and loads `.env`
//! - parses CLI arguments
//! - loads the model file
//! - runs evaluations / curve sampling
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CurvesArgs, EvalArgs, ModelArgs, TuiArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::fragility::SampleRange;

pub mod pipeline;

/// Entry point for the `frag` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Curves(args) => handle_curves(args),
        Command::List(args) => handle_list(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// `RUST_LOG` controls verbosity; warnings (e.g. IMT mismatches) show by default.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A second init (tests, embedding) is harmless.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_eval(&config)?;

    println!(
        "{}",
        crate::report::format_evaluation(&run.model, &config.component, &config.imt, &run.result)
    );
    if let Some(plot) = &run.plot {
        println!("{plot}");
    }

    Ok(())
}

fn handle_curves(args: CurvesArgs) -> Result<(), AppError> {
    let model = load_model(&args.model)?;
    let range = SampleRange::new(args.min, args.max);
    let points = model.describe_curve_family(&args.component, &args.imt, args.samples, range)?;

    if let Some(path) = &args.export {
        let rows = crate::io::write_curve_samples_csv(path, points)?;
        eprintln!("Wrote {rows} rows to {}", path.display());
        return Ok(());
    }

    crate::io::write_curve_samples(std::io::stdout().lock(), points)?;
    Ok(())
}

fn handle_list(args: ModelArgs) -> Result<(), AppError> {
    let model = load_model(&args)?;
    print!("{}", crate::report::format_families(&model));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let model = load_model(&args.model)?;
    crate::tui::run(model, args.component, args.value)
}

fn load_model(args: &ModelArgs) -> Result<crate::fragility::FragilityModel, AppError> {
    let path = pipeline::resolve_model_path(args.model.as_deref())?;
    crate::io::read_model_json(&path)
}

pub fn run_config_from_args(args: &EvalArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        model_path: pipeline::resolve_model_path(args.model.model.as_deref())?,
        component: args.component.clone(),
        imt: args.imt.clone(),
        intensity: args.value,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        sample_count: args.samples,
        export_result: args.export.clone(),
        export_curves: args.export_curves.clone(),
    })
}
