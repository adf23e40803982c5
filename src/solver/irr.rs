//! Periodic Internal Rate of Return over evenly spaced buckets
//!
//! An approximation to XIRR: dated flows are lumped into 30-day buckets and
//! the periodic rate is annualized by compounding. It disagrees with XIRR on
//! the same input and is only reported alongside it, never in place of it.

use super::newton::newton_raphson;
use super::SolverConfig;
use crate::schedule::CashFlowSchedule;

/// Days per bucket when discretizing a dated schedule
pub const BUCKET_DAYS: u32 = 30;

/// Buckets treated as one year when annualizing
pub const BUCKETS_PER_YEAR: u32 = 12;

/// Annual IRR of evenly spaced cash flows, solved with the default settings
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    periodic_irr(cashflows, periods_per_year, &SolverConfig::default())
}

/// Annual IRR of evenly spaced cash flows
///
/// Newton runs on the per-period rate, seeded at the annual guess divided by
/// `periods_per_year`. `None` for an empty series, a series without both
/// inflows and outflows, or a search that does not converge. An all-zero
/// series is 0%.
pub fn periodic_irr(cashflows: &[f64], periods_per_year: u32, config: &SolverConfig) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    let inflows = cashflows.iter().any(|&cf| cf > 0.0);
    let outflows = cashflows.iter().any(|&cf| cf < 0.0);
    match (inflows, outflows) {
        (false, false) => return Some(0.0),
        (true, true) => {}
        _ => return None,
    }

    let periods = periods_per_year.max(1);
    let config = config.with_initial_guess(config.initial_guess / periods as f64);
    let search = newton_raphson(
        |r| periodic_npv(cashflows, r),
        |r| periodic_npv_slope(cashflows, r),
        &config,
    );

    if !search.converged {
        log::debug!(
            "Periodic IRR did not converge after {} iterations (rate {})",
            search.iterations,
            search.root
        );
        return None;
    }
    Some(annualize(search.root, periods))
}

/// Bucket a dated schedule into 30-day periods and solve the monthly IRR
pub fn bucketed_irr(schedule: &CashFlowSchedule) -> Option<f64> {
    bucketed_irr_with_config(schedule, &SolverConfig::default())
}

pub fn bucketed_irr_with_config(schedule: &CashFlowSchedule, config: &SolverConfig) -> Option<f64> {
    let buckets = bucket_cashflows(schedule, BUCKET_DAYS);
    periodic_irr(&buckets, BUCKETS_PER_YEAR, config)
}

/// Sum event amounts into consecutive buckets of `bucket_days` days
pub fn bucket_cashflows(schedule: &CashFlowSchedule, bucket_days: u32) -> Vec<f64> {
    let bucket_days = bucket_days.max(1);
    let mut buckets = vec![0.0; (schedule.total_days() / bucket_days) as usize + 1];
    for event in schedule.events() {
        buckets[(event.day_offset / bucket_days) as usize] += event.amount;
    }
    buckets
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// Present value of bucket `t` amounts at per-period rate `r`
fn periodic_npv(cashflows: &[f64], r: f64) -> f64 {
    let growth = 1.0 + r;
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf * growth.powi(-(t as i32)))
        .sum()
}

fn periodic_npv_slope(cashflows: &[f64], r: f64) -> f64 {
    let growth = 1.0 + r;
    cashflows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, &cf)| -(t as f64) * cf * growth.powi(-(t as i32) - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::xirr;

    #[test]
    fn test_simple_irr() {
        // $1000 in, $1100 back after 12 monthly periods
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!((irr - 0.10).abs() < 0.001, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_slope_matches_finite_difference() {
        let cashflows = [-1_000.0, -200.0, 0.0, 150.0, 1_300.0];
        let h = 1e-6;
        for r in [-0.05, 0.0, 0.02, 0.3] {
            let numeric = (periodic_npv(&cashflows, r + h) - periodic_npv(&cashflows, r - h)) / (2.0 * h);
            assert!((numeric - periodic_npv_slope(&cashflows, r)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_unconverged_search_gives_none() {
        let config = SolverConfig::default().with_max_iterations(1);
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1500.0);
        assert_eq!(periodic_irr(&cashflows, 12, &config), None);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(calculate_irr(&[-100.0, -50.0], 12), None);
        assert_eq!(calculate_irr(&[], 12), None);
        assert_eq!(calculate_irr(&[0.0, 0.0], 12), Some(0.0));
    }

    #[test]
    fn test_bucketing() {
        let schedule =
            CashFlowSchedule::from_pairs(&[(-10_000.0, 0), (-2_000.0, 180), (-500.0, 185), (13_500.0, 365)])
                .unwrap();
        let buckets = bucket_cashflows(&schedule, 30);
        assert_eq!(buckets.len(), 13);
        assert_eq!(buckets[0], -10_000.0);
        assert_eq!(buckets[6], -2_500.0);
        assert_eq!(buckets[12], 13_500.0);
    }

    #[test]
    fn test_bucketed_irr_differs_from_xirr() {
        let schedule =
            CashFlowSchedule::from_pairs(&[(-10_000.0, 0), (-2_000.0, 180), (13_500.0, 365)]).unwrap();
        let bucketed = bucketed_irr(&schedule).unwrap();
        let exact = xirr(&schedule);

        assert!(exact.converged);
        // Same neighbourhood, different answer
        assert!((bucketed - exact.rate).abs() < 0.02);
        assert!((bucketed - exact.rate).abs() > 1e-6);
    }
}
