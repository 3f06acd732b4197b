//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during evaluation
//! - exported to JSON/CSV
//! - reloaded later for comparisons or downstream tooling

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fully specified applicant profile.
///
/// Every pipeline stage assumes the profile is complete; there are no partial
/// profiles. Range validation happens at the input boundaries (CLI flags,
/// batch CSV rows) via [`StudentProfile::validate`], not inside the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Graduate exam (GRE) score, 260–340.
    pub gre: u32,
    /// English test (TOEFL) score, 0–120.
    pub toefl: u32,
    /// University rating, 1 (low prestige) to 5 (very high).
    pub university_rating: u8,
    /// Statement-of-purpose quality, 1.0–5.0 in half-point steps.
    pub sop: f64,
    /// Recommendation-letter quality, 1.0–5.0 in half-point steps.
    pub lor: f64,
    /// Cumulative GPA on the 10-point scale, 6.8–10.0.
    pub cgpa: f64,
    /// Whether the applicant has research experience.
    pub research: bool,
}

impl StudentProfile {
    /// Check every field against its documented domain range.
    ///
    /// Returns a human-readable reason for the first violation. Used by the
    /// batch ingest for row-level errors and by the CLI for float flags that
    /// clap cannot range-check itself.
    pub fn validate(&self) -> Result<(), String> {
        if !(260..=340).contains(&self.gre) {
            return Err(format!("GRE score {} outside [260, 340].", self.gre));
        }
        if self.toefl > 120 {
            return Err(format!("TOEFL score {} outside [0, 120].", self.toefl));
        }
        if !(1..=5).contains(&self.university_rating) {
            return Err(format!(
                "University rating {} outside [1, 5].",
                self.university_rating
            ));
        }
        validate_half_step("SOP quality", self.sop)?;
        validate_half_step("LOR quality", self.lor)?;
        if !self.cgpa.is_finite() || !(6.8..=10.0).contains(&self.cgpa) {
            return Err(format!("CGPA {} outside [6.8, 10.0].", self.cgpa));
        }
        Ok(())
    }
}

fn validate_half_step(label: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(1.0..=5.0).contains(&value) {
        return Err(format!("{label} {value} outside [1.0, 5.0]."));
    }
    // Half-point grid, with a little float slack for values parsed from text.
    if ((value * 2.0) - (value * 2.0).round()).abs() > 1e-9 {
        return Err(format!("{label} {value} is not a half-point step."));
    }
    Ok(())
}

/// Qualitative admission-chance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl Category {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::VeryHigh => "Very High",
            Category::High => "High",
            Category::Medium => "Medium",
            Category::Low => "Low",
        }
    }

    /// Hex color token consumed by presentation layers.
    ///
    /// The TUI maps this to a terminal RGB color; exports carry it verbatim
    /// so downstream renderers agree on the band palette.
    pub fn color_token(self) -> &'static str {
        match self {
            Category::VeryHigh => "#28a745",
            Category::High => "#17a2b8",
            Category::Medium => "#ffc107",
            Category::Low => "#dc3545",
        }
    }
}

/// A single rule-triggered recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    RaiseCgpa,
    GrePrep,
    ImproveToefl,
    ReviseStatement,
    StrengthenLetters,
    GainResearch,
    AddBackupSchools,
}

impl Advisory {
    /// Stable machine-readable name (matches the serde encoding).
    pub fn slug(self) -> &'static str {
        match self {
            Advisory::RaiseCgpa => "raise_cgpa",
            Advisory::GrePrep => "gre_prep",
            Advisory::ImproveToefl => "improve_toefl",
            Advisory::ReviseStatement => "revise_statement",
            Advisory::StrengthenLetters => "strengthen_letters",
            Advisory::GainResearch => "gain_research",
            Advisory::AddBackupSchools => "add_backup_schools",
        }
    }

    /// Advisory text shown to the applicant.
    pub fn message(self) -> &'static str {
        match self {
            Advisory::RaiseCgpa => {
                "Focus on improving your CGPA: it is one of the most heavily weighted factors."
            }
            Advisory::GrePrep => {
                "Prepare further for the GRE: consider a structured preparation course."
            }
            Advisory::ImproveToefl => {
                "Improve your TOEFL score: practice speaking and writing."
            }
            Advisory::ReviseStatement => {
                "Polish your statement of purpose: tell a convincing story."
            }
            Advisory::StrengthenLetters => {
                "Strengthen your recommendation letters: build relationships with professors."
            }
            Advisory::GainResearch => {
                "Seek research experience: it is a key differentiator."
            }
            Advisory::AddBackupSchools => {
                "Consider backup universities: diversify your application list."
            }
        }
    }
}

/// The computed estimate for one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionEstimate {
    /// Raw network output scaled to a percentage.
    ///
    /// Not clamped: a miscalibrated artifact can push this outside [0, 100].
    /// Classification is total over all reals, so downstream stages cope.
    pub probability_percent: f64,
    pub category: Category,
    /// Advisories in fixed rule order (not significance-ranked).
    pub advisories: Vec<Advisory>,
}

/// A saved estimate file (JSON).
///
/// The "portable" representation of one evaluation: the profile that was
/// scored, the raw network output, the derived estimate, and the radar grid
/// used for plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateFile {
    pub tool: String,
    pub evaluated_on: NaiveDate,
    pub profile: StudentProfile,
    pub raw_output: f64,
    pub probability_percent: f64,
    pub category: Category,
    /// Hex color for the category band (see [`Category::color_token`]).
    pub color: String,
    pub advisories: Vec<Advisory>,
    /// Per-feature 0–100 radar axes, in model feature order.
    pub radar: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> StudentProfile {
        StudentProfile {
            gre: 320,
            toefl: 110,
            university_rating: 3,
            sop: 4.0,
            lor: 4.0,
            cgpa: 8.5,
            research: true,
        }
    }

    #[test]
    fn validate_accepts_documented_ranges() {
        assert!(base_profile().validate().is_ok());

        let mut edge = base_profile();
        edge.gre = 260;
        edge.toefl = 0;
        edge.university_rating = 1;
        edge.sop = 1.0;
        edge.lor = 5.0;
        edge.cgpa = 6.8;
        edge.research = false;
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let mut p = base_profile();
        p.gre = 350;
        assert!(p.validate().unwrap_err().contains("GRE"));

        let mut p = base_profile();
        p.cgpa = 6.5;
        assert!(p.validate().unwrap_err().contains("CGPA"));

        let mut p = base_profile();
        p.sop = 3.7;
        assert!(p.validate().unwrap_err().contains("half-point"));
    }

    #[test]
    fn advisory_slug_matches_serde_encoding() {
        for advisory in [
            Advisory::RaiseCgpa,
            Advisory::GrePrep,
            Advisory::ImproveToefl,
            Advisory::ReviseStatement,
            Advisory::StrengthenLetters,
            Advisory::GainResearch,
            Advisory::AddBackupSchools,
        ] {
            let encoded = serde_json::to_string(&advisory).unwrap();
            assert_eq!(encoded, format!("\"{}\"", advisory.slug()));
        }
    }
}
