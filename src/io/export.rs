//! Export evaluation results and sampled curves.
//!
//! - sampled curves go to CSV (`intensity,state,exceedance`), the long
//!   format spreadsheet and plotting tools expect
//! - a single evaluation goes to JSON

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{EvaluationFile, StateRow};
use crate::error::AppError;
use crate::fragility::{CurvePoint, FragilityModel, StateProbabilities};

/// Write sampled curve points to a CSV file. Returns the number of rows written.
pub fn write_curve_samples_csv<'a>(
    path: &Path,
    points: impl IntoIterator<Item = CurvePoint<'a>>,
) -> Result<usize, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve CSV '{}': {e}", path.display())))?;
    write_curve_samples(file, points)
}

/// Write sampled curve points as CSV (`intensity,state,exceedance`) to any writer.
pub fn write_curve_samples<'a, W: Write>(
    out: W,
    points: impl IntoIterator<Item = CurvePoint<'a>>,
) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut rows = 0usize;
    for p in points {
        writer
            .serialize(&p)
            .map_err(|e| AppError::new(2, format!("Failed to write curve CSV row: {e}")))?;
        rows += 1;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush curve CSV: {e}")))?;

    Ok(rows)
}

/// Assemble the export record for one evaluation.
pub fn evaluation_file(
    model: &FragilityModel,
    component: &str,
    imt: &str,
    result: &StateProbabilities,
) -> EvaluationFile {
    let states = result
        .states()
        .iter()
        .zip(result.exceedances())
        .zip(result.probabilities())
        .map(|((state, &exceedance), &probability)| StateRow {
            state: state.clone(),
            exceedance,
            probability,
        })
        .collect();

    EvaluationFile {
        tool: "frag".to_string(),
        model: model.name().to_string(),
        component: component.to_string(),
        component_key: model.component_key(component),
        imt: imt.to_string(),
        intensity: result.intensity(),
        states,
        residual: result.residual(),
    }
}

/// Write one evaluation to a JSON file.
pub fn write_evaluation_json(path: &Path, evaluation: &EvaluationFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, evaluation)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_labels_are_quoted() {
        let points = vec![
            CurvePoint {
                intensity: 0.5,
                state: "slight, non-structural",
                exceedance: 0.25,
            },
            CurvePoint {
                intensity: 0.5,
                state: "\"complete\"",
                exceedance: 0.125,
            },
        ];
        let mut buf = Vec::new();
        let rows = write_curve_samples(&mut buf, points).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "intensity,state,exceedance\n\
             0.5,\"slight, non-structural\",0.25\n\
             0.5,\"\"\"complete\"\"\",0.125\n"
        );

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let states: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[1].to_string())
            .collect();
        assert_eq!(states, ["slight, non-structural", "\"complete\""]);
    }
}
