//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//!
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::EvalOutput;
use crate::domain::StudentProfile;
use crate::io::batch::RowError;
use crate::report::Leaderboard;

/// Format the full single-profile run summary.
pub fn format_estimate(output: &EvalOutput) -> String {
    let estimate = &output.estimate;
    let mut out = String::new();

    out.push_str("=== admit - Admission Estimate ===\n");
    out.push_str(&format!("Profile : {}\n", format_profile_line(&output.profile)));
    out.push_str(&format!(
        "Estimate: {:.1}% ({})\n",
        estimate.probability_percent,
        estimate.category.display_name()
    ));

    if !(0.0..=1.0).contains(&output.raw_output) {
        out.push_str(&format!(
            "Note    : raw model output {:.4} is outside [0, 1]; the artifact \
             may be miscalibrated.\n",
            output.raw_output
        ));
    }

    out.push_str("\nDetail:\n");
    out.push_str(&format!(
        "- GRE   {:>3}/340 ({:+} vs cohort average 320)\n",
        output.profile.gre,
        output.profile.gre as i64 - 320
    ));
    out.push_str(&format!(
        "- TOEFL {:>3}/120 ({:+} vs recommended minimum 100)\n",
        output.profile.toefl,
        output.profile.toefl as i64 - 100
    ));
    out.push_str(&format!(
        "- CGPA  {:.2}/10 ({:+.2} vs cohort average 8.00)\n",
        output.profile.cgpa,
        output.profile.cgpa - 8.0
    ));
    out.push_str(&format!(
        "- Overall strength: {:.1}/5\n",
        estimate.probability_percent / 100.0 * 5.0
    ));

    out
}

/// Format the advisory list (numbered, rule order).
pub fn format_advisories(output: &EvalOutput) -> String {
    let advisories = &output.estimate.advisories;
    if advisories.is_empty() {
        return "No advisories: every profile target is met.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Advisories:\n");
    for (i, advisory) in advisories.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, advisory.message()));
    }
    out
}

/// One-line output for scripting: `<percent> <category-slug>`.
pub fn format_score_line(output: &EvalOutput) -> String {
    format!(
        "{:.1} {}",
        output.estimate.probability_percent,
        output
            .estimate
            .category
            .display_name()
            .to_ascii_lowercase()
            .replace(' ', "-")
    )
}

/// Format the batch run summary (counters + skipped rows).
pub fn format_batch_summary(rows_read: usize, used: usize, row_errors: &[RowError]) -> String {
    let mut out = String::new();
    out.push_str("=== admit - Batch Evaluation ===\n");
    out.push_str(&format!("Rows: read={rows_read} used={used}\n"));

    if !row_errors.is_empty() {
        out.push_str(&format!("Skipped {} row(s):\n", row_errors.len()));
        for err in row_errors {
            match &err.id {
                Some(id) => out.push_str(&format!("- line {} ({}): {}\n", err.line, id, err.message)),
                None => out.push_str(&format!("- line {}: {}\n", err.line, err.message)),
            }
        }
    }

    out
}

/// Format the strongest/weakest tables.
pub fn format_leaderboard(board: &Leaderboard) -> String {
    let mut out = String::new();

    out.push_str("Strongest profiles:\n");
    out.push_str(&format_table(&board.strongest));
    out.push('\n');

    out.push_str("Weakest profiles:\n");
    out.push_str(&format_table(&board.weakest));

    out
}

fn format_table(rows: &[crate::app::pipeline::BatchResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>5} {:>6} {:>5} {:>5} {:>5} {:>6} {:>4} {:>8} {:<10}\n",
        "id", "gre", "toefl", "univ", "sop", "lor", "cgpa", "res", "percent", "category"
    ));
    out.push_str(&format!(
        "{:-<20} {:-<5} {:-<6} {:-<5} {:-<5} {:-<5} {:-<6} {:-<4} {:-<8} {:-<10}\n",
        "", "", "", "", "", "", "", "", "", ""
    ));

    for row in rows {
        let p = &row.output.profile;
        out.push_str(&format!(
            "{:<20} {:>5} {:>6} {:>5} {:>5.1} {:>5.1} {:>6.2} {:>4} {:>8.1} {:<10}\n",
            truncate(&row.id, 20),
            p.gre,
            p.toefl,
            p.university_rating,
            p.sop,
            p.lor,
            p.cgpa,
            if p.research { "yes" } else { "no" },
            row.output.estimate.probability_percent,
            row.output.estimate.category.display_name(),
        ));
    }

    out
}

fn format_profile_line(profile: &StudentProfile) -> String {
    format!(
        "GRE={} TOEFL={} Univ={} SOP={:.1} LOR={:.1} CGPA={:.2} Research={}",
        profile.gre,
        profile.toefl,
        profile.university_rating,
        profile.sop,
        profile.lor,
        profile.cgpa,
        if profile.research { "yes" } else { "no" }
    )
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
