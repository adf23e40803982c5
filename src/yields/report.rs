//! Evaluation output: solved rate plus invested/return totals

use serde::{Deserialize, Serialize};

use crate::solver::{SolverResult, YieldMethod};

/// Result of evaluating one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldReport {
    pub result: SolverResult,

    /// Principal plus all contributions
    pub total_invested: f64,

    /// Final value minus total invested
    pub total_return: f64,

    /// Terminal value of the investment
    pub final_value: f64,

    /// Elapsed days for dated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl YieldReport {
    pub fn new(result: SolverResult, total_invested: f64, final_value: f64, days: Option<u32>) -> Self {
        Self {
            result,
            total_invested,
            total_return: final_value - total_invested,
            final_value,
            days,
        }
    }

    /// Neutral report shown when a request cannot form a valid schedule
    pub fn zero(method: YieldMethod) -> Self {
        Self {
            result: SolverResult::zero(method),
            total_invested: 0.0,
            total_return: 0.0,
            final_value: 0.0,
            days: Some(0),
        }
    }

    pub fn rate(&self) -> f64 {
        self.result.rate
    }

    pub fn converged(&self) -> bool {
        self.result.converged
    }
}
