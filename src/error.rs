//! Error types for schedule construction and request loading
//!
//! Solver non-convergence is not an error: it is reported through
//! `SolverResult::converged`.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the crate
pub type YieldResult<T> = Result<T, YieldError>;

/// Errors raised while building schedules or reading requests
#[derive(Error, Debug)]
pub enum YieldError {
    /// Elapsed duration is zero or negative
    #[error("Invalid schedule: end date {end} is not after start date {start}")]
    InvalidSchedule { start: NaiveDate, end: NaiveDate },

    /// A top-up dated before the initial investment
    #[error("Top-up on {date} falls before the start date {start}")]
    TopUpBeforeStart { date: NaiveDate, start: NaiveDate },

    /// A top-up dated after the valuation date
    #[error("Top-up on {date} falls after the end date {end}")]
    TopUpAfterEnd { date: NaiveDate, end: NaiveDate },

    /// Hand-built schedule with no events
    #[error("Cash flow schedule is empty")]
    EmptySchedule,

    /// Hand-built schedule whose day offsets go backwards or do not start at 0
    #[error("Cash flow schedule is not ordered at event {index}")]
    UnorderedSchedule { index: usize },

    /// Malformed request field
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YieldError {
    /// Creates an invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for the build failures the engine maps to a zero-valued report
    pub fn is_degenerate_schedule(&self) -> bool {
        matches!(
            self,
            YieldError::InvalidSchedule { .. }
                | YieldError::TopUpBeforeStart { .. }
                | YieldError::TopUpAfterEnd { .. }
        )
    }
}
