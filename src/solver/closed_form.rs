//! Closed-form annual rates
//!
//! Every function returns a fraction (0.08 = 8%) and a defined zero for
//! non-positive principal or duration instead of NaN or infinity.

use super::{SolverResult, YieldMethod};
use crate::schedule::term::DAYS_PER_YEAR;

/// Compound annual growth rate: `(final / initial)^(365 / days) - 1`
pub fn cagr(initial: f64, final_amount: f64, days: u32) -> SolverResult {
    if initial <= 0.0 || days == 0 {
        return SolverResult::zero(YieldMethod::Cagr);
    }

    let rate = (final_amount / initial).powf(DAYS_PER_YEAR / days as f64) - 1.0;
    SolverResult {
        rate,
        converged: true,
        iterations: 0,
        method: YieldMethod::Cagr,
    }
}

/// Simple (non-compounding) annual rate from a daily rate
pub fn simple_annual_rate(principal: f64, total_amount: f64, days: f64) -> f64 {
    if principal <= 0.0 || days <= 0.0 {
        return 0.0;
    }
    let interest = total_amount - principal;
    interest / principal / days * DAYS_PER_YEAR
}

/// Compound annual rate over a term measured in years
pub fn compound_annual_rate(principal: f64, total_amount: f64, years: f64) -> f64 {
    if principal <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    (total_amount / principal).powf(1.0 / years) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr_one_year() {
        let result = cagr(10_000.0, 12_000.0, 365);
        assert_eq!(result.method, YieldMethod::Cagr);
        assert!(result.converged);
        assert_relative_eq!(result.rate, 0.20, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_two_years() {
        let result = cagr(10_000.0, 12_100.0, 730);
        assert_relative_eq!(result.rate, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_guards() {
        assert_eq!(cagr(0.0, 500.0, 365), SolverResult::zero(YieldMethod::Cagr));
        assert_eq!(cagr(-10.0, 500.0, 365), SolverResult::zero(YieldMethod::Cagr));
        assert_eq!(cagr(100.0, 500.0, 0), SolverResult::zero(YieldMethod::Cagr));
    }

    #[test]
    fn test_cagr_total_loss() {
        assert_relative_eq!(cagr(1_000.0, 0.0, 200).rate, -1.0);
    }

    #[test]
    fn test_simple_annual_rate() {
        // 5% over half a year is 10% simple annual
        assert_relative_eq!(simple_annual_rate(1_000.0, 1_050.0, 182.5), 0.10, epsilon = 1e-12);
        assert_eq!(simple_annual_rate(0.0, 1_050.0, 100.0), 0.0);
        assert_eq!(simple_annual_rate(1_000.0, 1_050.0, 0.0), 0.0);
    }

    #[test]
    fn test_compound_annual_rate() {
        assert_relative_eq!(compound_annual_rate(1_000.0, 1_210.0, 2.0), 0.10, epsilon = 1e-12);
        assert_eq!(compound_annual_rate(1_000.0, 1_210.0, -1.0), 0.0);
    }
}
