//! Export estimates to JSON and batch results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON estimate is the "portable" representation of one
//! evaluation (schema defined by `domain::EstimateFile`).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::{BatchResult, EvalOutput};
use crate::domain::EstimateFile;
use crate::error::AppError;

/// Write one evaluation to an estimate JSON file.
pub fn write_estimate_json(path: &Path, output: &EvalOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create estimate JSON '{}': {e}", path.display()),
        )
    })?;

    let estimate = EstimateFile {
        tool: "admit".to_string(),
        evaluated_on: chrono::Local::now().date_naive(),
        profile: output.profile.clone(),
        raw_output: output.raw_output,
        probability_percent: output.estimate.probability_percent,
        category: output.estimate.category,
        color: output.estimate.category.color_token().to_string(),
        advisories: output.estimate.advisories.clone(),
        radar: output.radar.to_vec(),
    };

    serde_json::to_writer_pretty(file, &estimate)
        .map_err(|e| AppError::new(2, format!("Failed to write estimate JSON: {e}")))?;

    Ok(())
}

/// Write per-profile batch results to a CSV file.
pub fn write_results_csv(path: &Path, results: &[BatchResult]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create results CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "id,gre,toefl,university_rating,sop,lor,cgpa,research,raw_output,probability_percent,category,advisories"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write results CSV header: {e}")))?;

    for result in results {
        let p = &result.output.profile;
        let estimate = &result.output.estimate;
        let advisories = estimate
            .advisories
            .iter()
            .map(|a| a.slug())
            .collect::<Vec<_>>()
            .join(";");
        writeln!(
            file,
            "{},{},{},{},{:.1},{:.1},{:.2},{},{:.6},{:.2},{},{}",
            result.id,
            p.gre,
            p.toefl,
            p.university_rating,
            p.sop,
            p.lor,
            p.cgpa,
            u8::from(p.research),
            result.output.raw_output,
            estimate.probability_percent,
            estimate.category.display_name(),
            advisories,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write results CSV row: {e}")))?;
    }

    Ok(())
}
