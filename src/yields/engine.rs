//! Yield engine: picks the closed form or the iterative solver and adds totals

use super::report::YieldReport;
use super::request::{LumpSumRequest, PeriodicPlanRequest, YieldRequest};
use crate::error::YieldResult;
use crate::schedule::{build_lump_sum_schedule, build_periodic_schedule, CashFlowSchedule, Frequency};
use crate::solver::closed_form::cagr;
use crate::solver::sip::{solve_sip, SipParams};
use crate::solver::xirr::xirr_with_config;
use crate::solver::{SolverConfig, SolverResult, YieldMethod};

/// Stateless yield evaluator holding only solver settings
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldEngine {
    config: SolverConfig,
}

impl YieldEngine {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Annualized rate of a dated schedule
    ///
    /// Schedules with no interior contributions use CAGR; everything else
    /// runs XIRR. A schedule with money flowing only one way has no rate and
    /// reports zero, unconverged.
    pub fn solve_yield(&self, schedule: &CashFlowSchedule) -> SolverResult {
        if !schedule.has_interior_contributions() && schedule.final_amount() >= 0.0 {
            log::debug!("Closed-form CAGR over {} days", schedule.total_days());
            return cagr(
                schedule.initial_amount(),
                schedule.final_amount(),
                schedule.total_days(),
            );
        }

        if !schedule.has_sign_change() {
            log::warn!(
                "Schedule of {} events has no sign change; reporting zero rate",
                schedule.len()
            );
            return SolverResult {
                rate: 0.0,
                converged: false,
                iterations: 0,
                method: YieldMethod::Xirr,
            };
        }

        log::debug!("XIRR over {} events", schedule.len());
        xirr_with_config(schedule, &self.config)
    }

    /// Annualized rate of a plan in period space
    pub fn solve_sip_yield(&self, params: &SipParams) -> SolverResult {
        solve_sip(params, &self.config)
    }

    /// Solve a schedule and attach invested/return totals
    pub fn evaluate_schedule(&self, schedule: &CashFlowSchedule) -> YieldReport {
        let result = self.solve_yield(schedule);
        let total_invested = schedule.initial_amount() + schedule.total_contributions();
        YieldReport::new(
            result,
            total_invested,
            schedule.final_amount(),
            Some(schedule.total_days()),
        )
    }

    pub fn evaluate_lump_sum(&self, request: &LumpSumRequest) -> YieldReport {
        let schedule = build_lump_sum_schedule(
            request.initial_amount,
            request.start_date,
            &request.top_ups,
            request.final_amount,
            request.end_date,
        );
        self.evaluate_built(schedule, YieldMethod::Cagr)
    }

    pub fn evaluate_periodic_plan(&self, request: &PeriodicPlanRequest) -> YieldReport {
        let schedule = build_periodic_schedule(
            request.initial_amount,
            request.periodic_amount,
            request.frequency,
            request.start_date,
            request.end_date,
            request.final_amount,
        );
        self.evaluate_built(schedule, YieldMethod::Xirr)
    }

    pub fn evaluate_sip(&self, params: &SipParams) -> YieldReport {
        let result = self.solve_sip_yield(params);
        YieldReport::new(result, params.total_invested(), params.final_amount, None)
    }

    pub fn evaluate(&self, request: &YieldRequest) -> YieldReport {
        match request {
            YieldRequest::LumpSum(lump) => self.evaluate_lump_sum(lump),
            YieldRequest::PeriodicPlan(plan) => self.evaluate_periodic_plan(plan),
            YieldRequest::Sip(params) => self.evaluate_sip(params),
        }
    }

    /// Map rejected schedules to a neutral report instead of an error
    fn evaluate_built(&self, schedule: YieldResult<CashFlowSchedule>, fallback: YieldMethod) -> YieldReport {
        match schedule {
            Ok(schedule) => self.evaluate_schedule(&schedule),
            Err(e) => {
                log::warn!("No result for request: {}", e);
                YieldReport::zero(fallback)
            }
        }
    }
}

/// Annualized rate of a schedule with default solver settings
pub fn solve_yield(schedule: &CashFlowSchedule) -> SolverResult {
    YieldEngine::default().solve_yield(schedule)
}

/// Annualized rate of a periodic plan with default solver settings
///
/// `periodic_amount` is a monthly-equivalent contribution.
pub fn solve_sip_yield(
    initial_amount: f64,
    periodic_amount: f64,
    months: i64,
    frequency: Frequency,
    final_amount: f64,
) -> SolverResult {
    YieldEngine::default().solve_sip_yield(&SipParams {
        initial_amount,
        periodic_amount,
        months,
        frequency,
        final_amount,
    })
}
