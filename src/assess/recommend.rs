//! Rule-based advisories.
//!
//! Each rule is an independent (guard, advisory) pair. All matching rules
//! fire, in table order; the guards are not mutually exclusive and the order
//! is part of the contract (callers and tests rely on it). The table form
//! keeps each rule individually testable and makes adding one a one-line
//! change.

use crate::domain::{Advisory, StudentProfile};

struct Rule {
    advisory: Advisory,
    applies: fn(&StudentProfile, f64) -> bool,
}

const RULES: [Rule; 7] = [
    Rule {
        advisory: Advisory::RaiseCgpa,
        applies: cgpa_below_target,
    },
    Rule {
        advisory: Advisory::GrePrep,
        applies: gre_below_target,
    },
    Rule {
        advisory: Advisory::ImproveToefl,
        applies: toefl_below_target,
    },
    Rule {
        advisory: Advisory::ReviseStatement,
        applies: statement_below_target,
    },
    Rule {
        advisory: Advisory::StrengthenLetters,
        applies: letters_below_target,
    },
    Rule {
        advisory: Advisory::GainResearch,
        applies: missing_research,
    },
    Rule {
        advisory: Advisory::AddBackupSchools,
        applies: long_odds,
    },
];

fn cgpa_below_target(profile: &StudentProfile, _: f64) -> bool {
    profile.cgpa < 8.0
}

fn gre_below_target(profile: &StudentProfile, _: f64) -> bool {
    profile.gre < 320
}

fn toefl_below_target(profile: &StudentProfile, _: f64) -> bool {
    profile.toefl < 100
}

fn statement_below_target(profile: &StudentProfile, _: f64) -> bool {
    profile.sop < 4.0
}

fn letters_below_target(profile: &StudentProfile, _: f64) -> bool {
    profile.lor < 4.0
}

fn missing_research(profile: &StudentProfile, _: f64) -> bool {
    !profile.research
}

fn long_odds(_: &StudentProfile, percent: f64) -> bool {
    percent < 60.0
}

/// Evaluate every rule against the profile and computed percentage.
///
/// May return an empty list (all guards false).
pub fn recommend(profile: &StudentProfile, percent: f64) -> Vec<Advisory> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(profile, percent))
        .map(|rule| rule.advisory)
        .collect()
}
