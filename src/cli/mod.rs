//! Command-line parsing for the admission estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code. Flag defaults mirror the
//! interactive front-end's slider defaults (GRE 320, TOEFL 110, rating 3,
//! SOP/LOR 4.0, CGPA 8.5, research yes).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "admit", version, about = "University Admission Probability Estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one profile and print the full report (gauge, radar, advisories).
    Predict(ProfileArgs),
    /// Print only `<percent> <category>` for one profile (useful for scripting).
    Score(ProfileArgs),
    /// Evaluate a CSV of profiles and print the strongest/weakest leaderboard.
    Batch(BatchArgs),
    /// Generate seeded synthetic profiles and evaluate them.
    Sample(SampleArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying evaluation pipeline as `admit predict`,
    /// but renders results in a terminal UI using Ratatui.
    Tui(ProfileArgs),
}

/// Artifact location, shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct ArtifactArgs {
    /// Directory containing `model.json` and `scaler.json`
    /// (default: $ADMIT_ARTIFACT_DIR, else ./artifacts).
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

/// One applicant profile plus output options.
#[derive(Debug, Parser, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Graduate exam (GRE) score.
    #[arg(long, default_value_t = 320, value_parser = clap::value_parser!(u32).range(260..=340))]
    pub gre: u32,

    /// English test (TOEFL) score.
    #[arg(long, default_value_t = 110, value_parser = clap::value_parser!(u32).range(0..=120))]
    pub toefl: u32,

    /// University rating (1 = low prestige, 5 = very high).
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: u8,

    /// Statement-of-purpose quality (1.0-5.0, half-point steps).
    #[arg(long, default_value_t = 4.0)]
    pub sop: f64,

    /// Recommendation-letter quality (1.0-5.0, half-point steps).
    #[arg(long, default_value_t = 4.0)]
    pub lor: f64,

    /// Cumulative GPA on the 10-point scale (6.8-10.0).
    #[arg(long, default_value_t = 8.5)]
    pub cgpa: f64,

    /// The applicant has research experience (enabled by default).
    #[arg(long, default_value_t = true)]
    pub research: bool,

    /// The applicant has no research experience.
    #[arg(long)]
    pub no_research: bool,

    /// Render the ASCII gauge and radar bars (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Export the estimate (profile + result + radar grid) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for batch CSV evaluation.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Profile CSV (columns: gre, toefl, university_rating, sop, lor, cgpa,
    /// research; optional id).
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Write per-profile results to CSV.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Show top-N strongest and weakest profiles.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Options for synthetic sample evaluation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Number of synthetic profiles to generate.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Random seed (same seed, same profiles).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Show top-N strongest and weakest profiles.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Write per-profile results to CSV.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}
