//! Process-level error type.
//!
//! A single error struct carrying the message shown to the user and the exit
//! code of the process. Exit codes group failures by remediation:
//!
//! - `2`: usage/input errors (bad flag values, malformed batch CSV schema)
//! - `3`: a required artifact file could not be located
//! - `4`: an artifact exists but fails to deserialize or is internally
//!   inconsistent; also terminal front-end failures
//! - `5`: evaluation errors (feature-count mismatch, non-finite output)
//!
//! Recoverable per-row problems (e.g., one bad CSV line in a batch) are not
//! `AppError`s; they are collected as row errors and reported in bulk.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
