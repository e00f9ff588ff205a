//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the evaluator stays free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use crate::fragility::{FragilityModel, StateProbabilities};

/// Format one evaluation: header plus a state / exceedance / probability table.
pub fn format_evaluation(
    model: &FragilityModel,
    component: &str,
    imt: &str,
    result: &StateProbabilities,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== frag - Damage State Probabilities ({}) ===\n", model.name()));
    out.push_str(&format!(
        "Component: {component} (type '{}')\n",
        model.component_key(component)
    ));
    out.push_str(&format!("Intensity: {imt} = {}\n", result.intensity()));
    out.push('\n');

    out.push_str(&format!(
        "{:<20} {:>12}   {:<28} {:>12}\n",
        "state", "P(DS>=ds)", "damage interval", "probability"
    ));
    out.push_str(&format!("{:-<20} {:-<12}   {:-<28} {:-<12}\n", "", "", "", ""));

    for (i, (state, &e)) in result.states().iter().zip(result.exceedances()).enumerate() {
        let bucket = result.bucket_label(i).unwrap_or_default();
        out.push_str(&format!(
            "{:<20} {:>12.6}   {:<28} {:>12.6}\n",
            truncate(state, 20),
            e,
            truncate(&bucket, 28),
            result.probabilities()[i]
        ));
    }
    if let Some(label) = result.residual_label() {
        out.push_str(&format!(
            "{:<20} {:>12}   {:<28} {:>12.6}\n",
            "",
            "",
            truncate(&label, 28),
            result.residual()
        ));
    }

    out.push('\n');
    out.push_str(&format!("Sum: {:.6}\n", result.total() + result.residual()));
    if let Some(bucket) = result.most_likely_index().and_then(|i| result.bucket_label(i)) {
        out.push_str(&format!("Most likely: {bucket}\n"));
    }

    out
}

/// Format the families registered in a model.
pub fn format_families(model: &FragilityModel) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== frag - Model '{}' ===\n", model.name()));
    let applicable: Vec<&str> = model
        .applicable_components()
        .iter()
        .map(String::as_str)
        .collect();
    if applicable.is_empty() {
        out.push_str("Applicable components: -\n");
    } else {
        out.push_str(&format!("Applicable components: {}\n", applicable.join(", ")));
    }

    for (prefix, family) in model.families() {
        out.push_str(&format!(
            "\n{prefix} [{}] ({} states)\n",
            family.measures().join(", "),
            family.len()
        ));
        for s in family.states() {
            out.push_str(&format!(
                "  {:<20} median={:<10} beta={}\n",
                truncate(&s.name, 20),
                fmt_num(s.params.median),
                fmt_num(s.params.dispersion)
            ));
        }
    }

    out
}

fn fmt_num(v: f64) -> String {
    format!("{v:.4}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
