//! Extended IRR over dated cash flows on an actual/365 basis
//!
//! Solves `Σ CF_i / (1+r)^(d_i/365) = 0` for the annual rate `r`.

use super::newton::newton_raphson;
use super::{SolverConfig, SolverResult, YieldMethod};
use crate::schedule::CashFlowSchedule;

/// Derivative of the schedule's NPV with respect to the annual rate
///
/// Day-0 events do not depend on the rate and contribute nothing.
pub fn npv_derivative(schedule: &CashFlowSchedule, rate: f64) -> f64 {
    schedule
        .events()
        .iter()
        .filter(|e| e.day_offset != 0)
        .map(|e| {
            let years = e.years();
            -years * e.amount * (1.0 + rate).powf(-years - 1.0)
        })
        .sum()
}

/// XIRR with the default solver settings (10% guess, 1e-8, 1000 iterations)
pub fn xirr(schedule: &CashFlowSchedule) -> SolverResult {
    xirr_with_config(schedule, &SolverConfig::default())
}

/// XIRR with explicit solver settings
///
/// Never fails; inspect `converged` on the result.
pub fn xirr_with_config(schedule: &CashFlowSchedule, config: &SolverConfig) -> SolverResult {
    let search = newton_raphson(
        |r| schedule.npv(r),
        |r| npv_derivative(schedule, r),
        config,
    );

    if !search.converged {
        log::warn!(
            "XIRR did not converge after {} iterations (rate {:.6}, residual {:.2e})",
            search.iterations,
            search.root,
            search.residual
        );
    }

    SolverResult::from_search(search, YieldMethod::Xirr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_one_year_lump_sum() {
        let schedule = CashFlowSchedule::from_pairs(&[(-1_000.0, 0), (1_100.0, 365)]).unwrap();
        let result = xirr(&schedule);
        assert!(result.converged);
        assert_eq!(result.method, YieldMethod::Xirr);
        assert_abs_diff_eq!(result.rate, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_single_top_up_satisfies_npv() {
        let schedule =
            CashFlowSchedule::from_pairs(&[(-10_000.0, 0), (-2_000.0, 180), (13_500.0, 365)]).unwrap();
        let result = xirr(&schedule);

        assert!(result.converged);
        assert!(result.rate > 0.0 && result.rate < 0.2, "rate {}", result.rate);

        let r = result.rate;
        let npv = -10_000.0 - 2_000.0 / (1.0 + r).powf(180.0 / 365.0) + 13_500.0 / (1.0 + r);
        assert_abs_diff_eq!(npv, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let schedule =
            CashFlowSchedule::from_pairs(&[(-500.0, 0), (-250.0, 45), (-250.0, 200), (1_100.0, 730)]).unwrap();
        let h = 1e-6;
        for rate in [-0.5, 0.0, 0.07, 1.5] {
            let numeric = (schedule.npv(rate + h) - schedule.npv(rate - h)) / (2.0 * h);
            assert_abs_diff_eq!(npv_derivative(&schedule, rate), numeric, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_all_outflows_do_not_converge() {
        let schedule =
            CashFlowSchedule::from_pairs(&[(-1_000.0, 0), (-500.0, 100), (-250.0, 300)]).unwrap();
        let result = xirr(&schedule);
        assert!(!result.converged);
        assert!(result.rate > -1.0 && result.rate < 10.0);
    }
}
