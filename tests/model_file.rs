//! Model files and exports on disk.

use std::path::PathBuf;

use fragility_curves::app::pipeline::run_eval;
use fragility_curves::domain::{ModelFile, RunConfig};
use fragility_curves::fragility::{FragilityModel, SampleRange};
use fragility_curves::io::{
    evaluation_file, read_model_json, write_curve_samples_csv, write_evaluation_json,
    write_model_json,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fragility-curves-{}-{name}", std::process::id()))
}

fn network_model() -> FragilityModel {
    let mut model = FragilityModel::new("water-network");
    model.set_applicable_components(["Pipe", "Tank"]);
    model
        .set_fragility_curves(
            "Pipe",
            "PGA",
            &["minor", "moderate", "complete"],
            &[0.2, 0.4, 0.6],
            &[0.4, 0.4, 0.4],
        )
        .unwrap();
    model
        .set_fragility_curves("Tank", "PGV", &["leak", "rupture"], &[30.0, 60.0], &[0.6, 0.6])
        .unwrap();
    model
}

#[test]
fn model_json_survives_a_write_read_cycle() {
    let path = temp_path("model.json");
    let model = network_model();
    write_model_json(&path, &model).unwrap();

    let loaded = read_model_json(&path).unwrap();
    assert_eq!(loaded.name(), "water-network");
    assert!(loaded.claims("Tank2"));
    assert_eq!(
        loaded.evaluate("Pipe12", "PGA", 0.3).unwrap(),
        model.evaluate("Pipe12", "PGA", 0.3).unwrap()
    );

    std::fs::remove_file(&path).ok();
}

#[test]
fn hand_written_model_file_loads_without_applicable_components() {
    let path = temp_path("minimal.json");
    std::fs::write(
        &path,
        r#"{
            "name": "minimal",
            "families": [
                {
                    "prefix": "Pump",
                    "imt": "PGA",
                    "states": ["slight", "extensive"],
                    "medians": [0.15, 0.36],
                    "dispersions": [0.6, 0.6]
                }
            ]
        }"#,
    )
    .unwrap();

    let model = read_model_json(&path).unwrap();
    assert!(model.applicable_components().is_empty());
    let r = model.evaluate("Pump3", "PGA", 0.2).unwrap();
    assert_eq!(r.states(), ["slight", "extensive"]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn invalid_model_file_is_a_load_error() {
    let path = temp_path("invalid.json");
    std::fs::write(
        &path,
        r#"{"name":"bad","families":[{"prefix":"Pipe","imt":"PGA","states":["a"],"medians":[-1.0],"dispersions":[0.4]}]}"#,
    )
    .unwrap();

    let err = read_model_json(&path).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("Pipe"), "{err}");

    std::fs::remove_file(&path).ok();
    assert!(read_model_json(&path).is_err());
}

#[test]
fn evaluation_export_is_valid_json() {
    let path = temp_path("evaluation.json");
    let model = network_model();
    let result = model.evaluate("Tank1", "PGV", 45.0).unwrap();
    write_evaluation_json(&path, &evaluation_file(&model, "Tank1", "PGV", &result)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["component_key"], "Tank");
    assert_eq!(json["states"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(json["states"][1]["state"], "rupture");

    std::fs::remove_file(&path).ok();
}

#[test]
fn curve_csv_has_one_row_per_state_and_sample() {
    let path = temp_path("curves.csv");
    let model = network_model();
    let points = model
        .describe_curve_family("Pipe9", "PGA", 25, SampleRange::new(0.001, 1.2))
        .unwrap();
    let rows = write_curve_samples_csv(&path, points).unwrap();
    assert_eq!(rows, 75);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, ["intensity", "state", "exceedance"]);
    assert_eq!(reader.records().count(), 75);

    std::fs::remove_file(&path).ok();
}

#[test]
fn eval_pipeline_reads_model_and_writes_exports() {
    let model_path = temp_path("pipeline-model.json");
    let export = temp_path("pipeline-eval.json");
    let curves = temp_path("pipeline-curves.csv");
    write_model_json(&model_path, &network_model()).unwrap();

    let config = RunConfig {
        model_path: model_path.clone(),
        component: "Pipe4".to_string(),
        imt: "PGA".to_string(),
        intensity: 0.3,
        plot: true,
        plot_width: 40,
        plot_height: 12,
        sample_count: 10,
        export_result: Some(export.clone()),
        export_curves: Some(curves.clone()),
    };
    let out = run_eval(&config).unwrap();
    assert_eq!(out.result.most_likely(), Some("moderate"));
    assert!(out.plot.as_deref().is_some_and(|p| p.contains("3=complete")));

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(parsed["model"], "water-network");
    assert_eq!(csv::Reader::from_path(&curves).unwrap().records().count(), 30);

    for p in [model_path, export, curves] {
        std::fs::remove_file(p).ok();
    }
}

#[test]
fn model_file_schema_is_stable() {
    let file: ModelFile = serde_json::from_str(
        r#"{"name":"m","applicable_components":["Pipe"],"families":[]}"#,
    )
    .unwrap();
    assert_eq!(file.name, "m");
    assert_eq!(file.applicable_components, ["Pipe"]);
    assert!(file.families.is_empty());
}
