//! Annualized yield of a fixed-contribution plan with periodic compounding
//!
//! Works in per-period rate space (`p = r / periods_per_year`) and solves the
//! future-value equation `P0(1+p)^n + A((1+p)^n - 1)/p = V` for `r`.

use serde::{Deserialize, Serialize};

use super::newton::newton_raphson;
use super::{SolverConfig, SolverResult, YieldMethod};
use crate::schedule::Frequency;

/// Parameters of a periodic plan solved in period space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipParams {
    pub initial_amount: f64,
    /// Monthly-equivalent contribution, rescaled by the frequency
    pub periodic_amount: f64,
    pub months: i64,
    pub frequency: Frequency,
    pub final_amount: f64,
}

impl SipParams {
    /// Whole compounding periods in the plan: `floor(months / 12 * periods_per_year)`
    pub fn total_periods(&self) -> u32 {
        if self.months <= 0 {
            return 0;
        }
        let periods = (self.months as f64 / 12.0) * self.frequency.periods_per_year() as f64;
        periods.floor() as u32
    }

    /// Contribution made each period
    pub fn periodic_contribution(&self) -> f64 {
        self.frequency.normalize_monthly_amount(self.periodic_amount)
    }

    /// Principal plus every periodic contribution
    pub fn total_invested(&self) -> f64 {
        self.initial_amount + self.periodic_contribution() * self.total_periods() as f64
    }
}

/// Future value of `initial` plus `periods` end-of-period contributions
pub fn sip_future_value(initial: f64, contribution: f64, periods: u32, periodic_rate: f64) -> f64 {
    let n = periods as f64;
    if periodic_rate == 0.0 {
        return initial + contribution * n;
    }
    let growth_less_one = compound_growth_less_one(periodic_rate, n);
    initial * (1.0 + growth_less_one) + contribution * growth_less_one / periodic_rate
}

/// `(1+p)^n - 1` without cancellation for small `p`
fn compound_growth_less_one(periodic_rate: f64, n: f64) -> f64 {
    (n * periodic_rate.ln_1p()).exp_m1()
}

/// Below this per-period rate the slope uses its zero-rate limit
const SLOPE_LIMIT_THRESHOLD: f64 = 1e-9;

/// Derivative of the future value with respect to the per-period rate
fn future_value_slope(initial: f64, contribution: f64, periods: u32, periodic_rate: f64) -> f64 {
    let n = periods as f64;
    if periodic_rate.abs() < SLOPE_LIMIT_THRESHOLD {
        return initial * n + contribution * n * (n - 1.0) / 2.0;
    }
    let p = periodic_rate;
    let growth_less_one = compound_growth_less_one(p, n);
    let growth_slope = n * (1.0 + p).powf(n - 1.0);

    let principal_term = initial * growth_slope;
    let annuity_term = contribution * growth_slope / p;
    let quotient_correction = contribution * growth_less_one / (p * p);
    principal_term + annuity_term - quotient_correction
}

/// Solve for the annual rate that grows the plan to `final_amount`
///
/// A plan with `months <= 0` yields a zero rate without iterating.
pub fn solve_sip(params: &SipParams, config: &SolverConfig) -> SolverResult {
    if params.months <= 0 {
        return SolverResult::zero(YieldMethod::SipPeriodic);
    }

    let periods_per_year = params.frequency.periods_per_year() as f64;
    let periods = params.total_periods();
    let contribution = params.periodic_contribution();
    let initial = params.initial_amount;

    let search = newton_raphson(
        |r| sip_future_value(initial, contribution, periods, r / periods_per_year) - params.final_amount,
        // Chain rule through p = r / periods_per_year
        |r| future_value_slope(initial, contribution, periods, r / periods_per_year) / periods_per_year,
        config,
    );

    if !search.converged {
        log::warn!(
            "SIP yield did not converge after {} iterations (rate {:.6}, residual {:.2e})",
            search.iterations,
            search.root,
            search.residual
        );
    }

    SolverResult::from_search(search, YieldMethod::SipPeriodic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn monthly_plan(final_amount: f64) -> SipParams {
        SipParams {
            initial_amount: 10_000.0,
            periodic_amount: 1_000.0,
            months: 12,
            frequency: Frequency::Month,
            final_amount,
        }
    }

    #[test]
    fn test_total_periods() {
        let mut params = monthly_plan(24_000.0);
        assert_eq!(params.total_periods(), 12);

        params.frequency = Frequency::Week;
        assert_eq!(params.total_periods(), 52);

        params.months = 7;
        params.frequency = Frequency::Quarter;
        assert_eq!(params.total_periods(), 2);

        params.months = 5;
        params.frequency = Frequency::Year;
        assert_eq!(params.total_periods(), 0);
    }

    #[test]
    fn test_future_value_at_zero_rate() {
        assert_relative_eq!(sip_future_value(10_000.0, 1_000.0, 12, 0.0), 22_000.0);
    }

    #[test]
    fn test_slope_matches_finite_difference() {
        let h = 1e-7;
        for p in [0.004, 0.05, -0.01] {
            let numeric = (sip_future_value(10_000.0, 1_000.0, 12, p + h)
                - sip_future_value(10_000.0, 1_000.0, 12, p - h))
                / (2.0 * h);
            let analytic = future_value_slope(10_000.0, 1_000.0, 12, p);
            assert_relative_eq!(analytic, numeric, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_slope_near_zero_rate_approaches_limit() {
        let limit = future_value_slope(10_000.0, 1_000.0, 12, 0.0);
        assert_relative_eq!(limit, 186_000.0);
        let near = future_value_slope(10_000.0, 1_000.0, 12, 1e-5);
        assert_relative_eq!(near, limit, max_relative = 1e-3);
    }

    #[test]
    fn test_monthly_plan_solves_future_value_equation() {
        let params = monthly_plan(24_000.0);
        let result = solve_sip(&params, &SolverConfig::default());

        assert!(result.converged);
        assert_eq!(result.method, YieldMethod::SipPeriodic);
        assert!(result.rate > 0.0);

        let fv = sip_future_value(10_000.0, 1_000.0, 12, result.rate / 12.0);
        assert_abs_diff_eq!(fv, 24_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_break_even_plan_is_zero_rate() {
        let result = solve_sip(&monthly_plan(22_000.0), &SolverConfig::default());
        assert!(result.converged);
        assert_abs_diff_eq!(result.rate, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_non_positive_months_is_zero() {
        let mut params = monthly_plan(24_000.0);
        params.months = 0;
        let result = solve_sip(&params, &SolverConfig::default());
        assert_eq!(result, SolverResult::zero(YieldMethod::SipPeriodic));
    }

    #[test]
    fn test_higher_final_value_gives_higher_rate() {
        let config = SolverConfig::default();
        let low = solve_sip(&monthly_plan(23_000.0), &config);
        let high = solve_sip(&monthly_plan(25_000.0), &config);
        assert!(low.converged && high.converged);
        assert!(high.rate > low.rate);
    }
}
