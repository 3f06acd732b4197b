//! Profile CSV ingest.
//!
//! Turns a batch CSV into validated `StudentProfile`s:
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (row order preserved, no hidden state)
//! - **Separation of concerns**: no evaluation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::StudentProfile;
use crate::error::AppError;

/// Columns every batch CSV must carry, in no particular order.
const REQUIRED_COLUMNS: [&str; 7] = [
    "gre",
    "toefl",
    "university_rating",
    "sop",
    "lor",
    "cgpa",
    "research",
];

/// One successfully ingested row.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    /// Value of the optional `id` column, else `row-<line>`.
    pub id: String,
    pub profile: StudentProfile,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: validated records + row errors + counters.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub records: Vec<ProfileRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load and validate a profile CSV from disk.
pub fn load_profiles(path: &Path) -> Result<BatchInput, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open profile CSV '{}': {e}", path.display()),
        )
    })?;
    read_profiles(file)
}

/// Parse profiles from any reader (the testable core of [`load_profiles`]).
pub fn read_profiles(input: impl Read) -> Result<BatchInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, "id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{line}"));

        match parse_row(&record, &header_map) {
            Ok(profile) => match profile.validate() {
                Ok(()) => records.push(ProfileRecord { id, profile }),
                Err(message) => row_errors.push(RowError {
                    line,
                    id: Some(id),
                    message,
                }),
            },
            Err(message) => row_errors.push(RowError {
                line,
                id: Some(id),
                message,
            }),
        }
    }

    if records.is_empty() {
        return Err(AppError::new(
            2,
            "No valid profile rows remain after validation.",
        ));
    }

    Ok(BatchInput {
        records,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "\u{feff}gre"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<StudentProfile, String> {
    Ok(StudentProfile {
        gre: parse_u32(get_required(record, header_map, "gre")?, "gre")?,
        toefl: parse_u32(get_required(record, header_map, "toefl")?, "toefl")?,
        university_rating: parse_u8(
            get_required(record, header_map, "university_rating")?,
            "university_rating",
        )?,
        sop: parse_f64(get_required(record, header_map, "sop")?, "sop")?,
        lor: parse_f64(get_required(record, header_map, "lor")?, "lor")?,
        cgpa: parse_f64(get_required(record, header_map, "cgpa")?, "cgpa")?,
        research: parse_research(get_required(record, header_map, "research")?)?,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_u32(s: &str, name: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("Invalid `{name}` value '{s}' (expected an integer)."))
}

fn parse_u8(s: &str, name: &str) -> Result<u8, String> {
    s.parse::<u8>()
        .map_err(|_| format!("Invalid `{name}` value '{s}' (expected an integer)."))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}' (expected a number)."))?;
    if !v.is_finite() {
        return Err(format!("Invalid `{name}` value '{s}' (non-finite)."));
    }
    Ok(v)
}

fn parse_research(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        other => Err(format!(
            "Invalid `research` value '{other}' (expected 0/1, true/false, yes/no)."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,gre,toefl,university_rating,sop,lor,cgpa,research\n";

    #[test]
    fn parses_valid_rows_in_order() {
        let csv = format!(
            "{HEADER}\
             alice,320,110,3,4.0,4.0,8.5,1\n\
             bob,300,90,2,3.0,3.0,7.5,no\n"
        );
        let batch = read_profiles(csv.as_bytes()).unwrap();
        assert_eq!(batch.rows_read, 2);
        assert!(batch.row_errors.is_empty());
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].id, "alice");
        assert_eq!(batch.records[0].profile.gre, 320);
        assert!(batch.records[0].profile.research);
        assert_eq!(batch.records[1].id, "bob");
        assert!(!batch.records[1].profile.research);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let csv = "id,gre,toefl,university_rating,sop,lor,cgpa\nalice,320,110,3,4,4,8.5\n";
        let err = read_profiles(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("research"));
    }

    #[test]
    fn bad_rows_become_row_errors_without_aborting() {
        let csv = format!(
            "{HEADER}\
             alice,320,110,3,4.0,4.0,8.5,1\n\
             bad-gre,999,110,3,4.0,4.0,8.5,1\n\
             bad-bool,320,110,3,4.0,4.0,8.5,maybe\n\
             carol,310,100,4,4.5,4.0,9.1,0\n"
        );
        let batch = read_profiles(csv.as_bytes()).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.row_errors.len(), 2);
        assert_eq!(batch.row_errors[0].line, 3);
        assert_eq!(batch.row_errors[0].id.as_deref(), Some("bad-gre"));
        assert!(batch.row_errors[0].message.contains("GRE"));
        assert!(batch.row_errors[1].message.contains("research"));
    }

    #[test]
    fn all_rows_invalid_is_fatal() {
        let csv = format!("{HEADER}only,999,110,3,4.0,4.0,8.5,1\n");
        let err = read_profiles(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn header_matching_survives_bom_and_case() {
        let csv = "\u{feff}ID,GRE,TOEFL,University_Rating,SOP,LOR,CGPA,Research\n\
                   dora,330,115,5,4.5,5.0,9.4,yes\n";
        let batch = read_profiles(csv.as_bytes()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].id, "dora");
        assert_eq!(batch.records[0].profile.university_rating, 5);
    }

    #[test]
    fn missing_id_column_falls_back_to_line_number() {
        let csv = "gre,toefl,university_rating,sop,lor,cgpa,research\n\
                   320,110,3,4.0,4.0,8.5,1\n";
        let batch = read_profiles(csv.as_bytes()).unwrap();
        assert_eq!(batch.records[0].id, "row-2");
    }
}
