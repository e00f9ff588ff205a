//! Read/write fragility model JSON files.
//!
//! A model file is the portable representation of a `FragilityModel`:
//! - the model name and its applicable component prefixes
//! - one record per component type (IMT, state labels, medians, dispersions)
//!
//! The schema is defined by `domain::ModelFile`. Loading goes through
//! `FragilityModel::set_fragility_curves`, so a file can never produce a model
//! the registration API would have rejected.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use crate::domain::{FamilyRecord, ModelFile};
use crate::error::AppError;
use crate::fragility::FragilityModel;

/// Read a model JSON file and register every family it contains.
pub fn read_model_json(path: &Path) -> Result<FragilityModel, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let parsed: ModelFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid model JSON '{}': {e}", path.display())))?;

    let model = model_from_file(&parsed)?;
    info!(
        "loaded model '{}' from {} ({} families)",
        model.name(),
        path.display(),
        parsed.families.len()
    );
    Ok(model)
}

/// Build a model from an already parsed file.
pub fn model_from_file(file: &ModelFile) -> Result<FragilityModel, AppError> {
    let mut model = FragilityModel::new(file.name.clone());
    model.set_applicable_components(file.applicable_components.iter().cloned());

    for rec in &file.families {
        model
            .set_fragility_curves(
                rec.prefix.clone(),
                &rec.imt,
                rec.states.as_slice(),
                &rec.medians,
                &rec.dispersions,
            )
            .map_err(|e| AppError::new(2, format!("Invalid curve family '{}': {e}", rec.prefix)))?;
    }

    Ok(model)
}

/// Snapshot a model into the file schema.
pub fn model_to_file(model: &FragilityModel) -> ModelFile {
    let families = model
        .families()
        .map(|(prefix, family)| FamilyRecord {
            prefix: prefix.to_string(),
            imt: family
                .measures()
                .first()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            states: family.state_names().map(str::to_string).collect(),
            medians: family.states().iter().map(|s| s.params.median).collect(),
            dispersions: family.states().iter().map(|s| s.params.dispersion).collect(),
        })
        .collect();

    ModelFile {
        name: model.name().to_string(),
        applicable_components: model.applicable_components().iter().cloned().collect(),
        families,
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &FragilityModel) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &model_to_file(model))
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prefix: &str, medians: Vec<f64>) -> FamilyRecord {
        FamilyRecord {
            prefix: prefix.to_string(),
            imt: "PGA".to_string(),
            states: vec!["minor".to_string(), "complete".to_string()],
            medians,
            dispersions: vec![0.5, 0.5],
        }
    }

    #[test]
    fn file_families_are_registered() {
        let file = ModelFile {
            name: "scenario".to_string(),
            applicable_components: vec!["Pipe".to_string()],
            families: vec![record("Pipe", vec![0.3, 0.9])],
        };
        let model = model_from_file(&file).unwrap();
        assert_eq!(model.name(), "scenario");
        assert!(model.claims("Pipe4"));
        assert_eq!(model.family("Pipe").map(|f| f.len()), Some(2));
        assert_eq!(model_to_file(&model), file);
    }

    #[test]
    fn invalid_family_names_the_prefix() {
        let file = ModelFile {
            name: "broken".to_string(),
            applicable_components: Vec::new(),
            families: vec![record("Pump", vec![0.3])],
        };
        let err = model_from_file(&file).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Pump"), "{err}");
    }
}
