//! Yield solvers
//!
//! - [`closed_form`]: CAGR and the other closed-form annual rates
//! - [`newton`]: Newton-Raphson iteration shared by the iterative solvers
//! - [`xirr`]: actual/365 XIRR over a dated schedule
//! - [`sip`]: periodic-compounding yield of a fixed contribution plan
//! - [`irr`]: bucketed periodic IRR, kept for comparison with XIRR

pub mod closed_form;
pub mod irr;
pub mod newton;
pub mod sip;
pub mod xirr;

pub use closed_form::{cagr, compound_annual_rate, simple_annual_rate};
pub use irr::{bucketed_irr, bucketed_irr_with_config, calculate_irr, periodic_irr};
pub use newton::{newton_raphson, RootSearch};
pub use sip::{sip_future_value, solve_sip};
pub use xirr::{xirr, xirr_with_config};

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Starting guess for the annual rate (10%)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Absolute residual below which an iteration is considered converged
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Iteration cap; doubles as the solver's only timeout
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Admissible band for the annual rate, exclusive on both ends
pub const DEFAULT_RATE_BOUNDS: (f64, f64) = (-1.0, 10.0);

/// Iteration control for the Newton-Raphson solvers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: DEFAULT_RATE_BOUNDS.0,
            upper_bound: DEFAULT_RATE_BOUNDS.1,
        }
    }
}

impl SolverConfig {
    /// Defaults overridden by `YIELD_INITIAL_GUESS`, `YIELD_TOLERANCE` and
    /// `YIELD_MAX_ITERATIONS` when set and parseable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let initial_guess: f64 = env::var("YIELD_INITIAL_GUESS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.initial_guess);

        let tolerance: f64 = env::var("YIELD_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tolerance);

        let max_iterations: u32 = env::var("YIELD_MAX_ITERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_iterations);

        Self {
            initial_guess,
            tolerance,
            max_iterations,
            ..defaults
        }
    }

    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// True when `rate` lies strictly inside the admissible band
    pub fn in_bounds(&self, rate: f64) -> bool {
        rate > self.lower_bound && rate < self.upper_bound
    }
}

/// Which algorithm produced a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YieldMethod {
    Cagr,
    Xirr,
    SipPeriodic,
}

impl fmt::Display for YieldMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            YieldMethod::Cagr => "cagr",
            YieldMethod::Xirr => "xirr",
            YieldMethod::SipPeriodic => "sip-periodic",
        };
        f.write_str(name)
    }
}

/// Annualized rate with convergence diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Annual rate as a fraction (0.08 = 8%)
    pub rate: f64,
    pub converged: bool,
    pub iterations: u32,
    pub method: YieldMethod,
}

impl SolverResult {
    /// Defined zero-rate result for degenerate inputs
    pub fn zero(method: YieldMethod) -> Self {
        Self {
            rate: 0.0,
            converged: true,
            iterations: 0,
            method,
        }
    }

    pub(crate) fn from_search(search: RootSearch, method: YieldMethod) -> Self {
        Self {
            rate: search.root,
            converged: search.converged,
            iterations: search.iterations,
            method,
        }
    }

    /// Rate in percent (8.0 = 8%)
    pub fn rate_pct(&self) -> f64 {
        self.rate * 100.0
    }
}
