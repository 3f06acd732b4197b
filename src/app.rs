//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves and loads the pretrained artifacts
//! - runs the evaluation pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::artifacts;
use crate::cli::{BatchArgs, Command, ProfileArgs, SampleArgs};
use crate::domain::StudentProfile;
use crate::error::AppError;

pub mod pipeline;

use pipeline::BatchResult;

/// Entry point for the `admit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `admit` and `admit --gre 330` to behave like `admit tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args, OutputMode::Full),
        Command::Score(args) => handle_predict(args, OutputMode::ScoreOnly),
        Command::Batch(args) => handle_batch(args),
        Command::Sample(args) => handle_sample(args),
        Command::Tui(args) => handle_tui(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ScoreOnly,
}

fn handle_predict(args: ProfileArgs, mode: OutputMode) -> Result<(), AppError> {
    let profile = profile_from_args(&args)?;
    let dir = artifacts::resolve_dir(args.artifacts.artifacts.as_deref());
    let artifacts = artifacts::load_shared(&dir)?;

    let output = pipeline::evaluate(&profile, artifacts)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_estimate(&output));
            if args.plot && !args.no_plot {
                println!("{}", crate::plot::render_gauge(output.estimate.probability_percent, args.width));
                println!("{}", crate::plot::render_radar_bars(&output.radar, args.width));
            }
            println!("{}", crate::report::format_advisories(&output));
        }
        OutputMode::ScoreOnly => {
            println!("{}", crate::report::format_score_line(&output));
        }
    }

    if let Some(path) = &args.export {
        crate::io::export::write_estimate_json(path, &output)?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let dir = artifacts::resolve_dir(args.artifacts.artifacts.as_deref());
    let artifacts = artifacts::load_shared(&dir)?;

    let batch = crate::io::batch::load_profiles(&args.input)?;
    let profiles: Vec<StudentProfile> = batch.records.iter().map(|r| r.profile.clone()).collect();
    let outputs = pipeline::evaluate_batch(&profiles, artifacts)?;

    let results: Vec<BatchResult> = batch
        .records
        .iter()
        .zip(outputs)
        .map(|(record, output)| BatchResult {
            id: record.id.clone(),
            output,
        })
        .collect();

    println!(
        "{}",
        crate::report::format_batch_summary(batch.rows_read, results.len(), &batch.row_errors)
    );
    let board = crate::report::rank(&results, args.top);
    println!("{}", crate::report::format_leaderboard(&board));

    if let Some(path) = &args.output {
        crate::io::export::write_results_csv(path, &results)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let dir = artifacts::resolve_dir(args.artifacts.artifacts.as_deref());
    let artifacts = artifacts::load_shared(&dir)?;

    let profiles = crate::data::generate_profiles(args.count, args.seed)?;
    let outputs = pipeline::evaluate_batch(&profiles, artifacts)?;

    let results: Vec<BatchResult> = outputs
        .into_iter()
        .enumerate()
        .map(|(i, output)| BatchResult {
            id: format!("sample-{:03}", i + 1),
            output,
        })
        .collect();

    println!("=== admit - Synthetic Sample (seed {}) ===\n", args.seed);
    let board = crate::report::rank(&results, args.top);
    println!("{}", crate::report::format_leaderboard(&board));

    if let Some(path) = &args.output {
        crate::io::export::write_results_csv(path, &results)?;
    }

    Ok(())
}

fn handle_tui(args: ProfileArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Build a validated profile from CLI flags.
///
/// Clap already range-checks the integer flags; the float flags and the
/// combined research pair go through the domain validator here.
pub fn profile_from_args(args: &ProfileArgs) -> Result<StudentProfile, AppError> {
    let profile = StudentProfile {
        gre: args.gre,
        toefl: args.toefl,
        university_rating: args.rating,
        sop: args.sop,
        lor: args.lor,
        cgpa: args.cgpa,
        research: args.research && !args.no_research,
    };
    profile.validate().map_err(|e| AppError::new(2, e))?;
    Ok(profile)
}

/// Rewrite argv so `admit` defaults to `admit tui`.
///
/// Rules:
/// - `admit`                      -> `admit tui`
/// - `admit --gre 330 ...`        -> `admit tui --gre 330 ...`
/// - `admit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "predict" | "score" | "batch" | "sample" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> ProfileArgs {
        let mut full = vec!["admit", "predict"];
        full.extend(argv);
        match crate::cli::Cli::parse_from(full).command {
            Command::Predict(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn profile_defaults_mirror_the_interactive_front_end() {
        let profile = profile_from_args(&args(&[])).unwrap();
        assert_eq!(profile.gre, 320);
        assert_eq!(profile.toefl, 110);
        assert_eq!(profile.university_rating, 3);
        assert_eq!(profile.sop, 4.0);
        assert_eq!(profile.lor, 4.0);
        assert_eq!(profile.cgpa, 8.5);
        assert!(profile.research);
    }

    #[test]
    fn no_research_flag_wins() {
        let profile = profile_from_args(&args(&["--no-research"])).unwrap();
        assert!(!profile.research);
    }

    #[test]
    fn float_flags_are_validated_with_exit_code_2() {
        let err = profile_from_args(&args(&["--cgpa", "5.0"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = profile_from_args(&args(&["--sop", "3.7"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        let argv = rewrite_args(vec!["admit".to_string()]);
        assert_eq!(argv, vec!["admit".to_string(), "tui".to_string()]);
    }

    #[test]
    fn leading_flag_defaults_to_tui() {
        let argv = rewrite_args(vec![
            "admit".to_string(),
            "--gre".to_string(),
            "330".to_string(),
        ]);
        assert_eq!(argv[1], "tui");
        assert_eq!(argv[2], "--gre");
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        let argv = rewrite_args(vec!["admit".to_string(), "score".to_string()]);
        assert_eq!(argv[1], "score");

        let argv = rewrite_args(vec!["admit".to_string(), "--help".to_string()]);
        assert_eq!(argv[1], "--help");
    }
}
