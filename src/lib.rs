//! Annual Yield - annualized return engine for personal investments
//!
//! This library provides:
//! - Cash flow schedules from lump sums with top-ups and periodic plans
//! - Closed-form CAGR for single-investment schedules
//! - Newton-Raphson XIRR over dated cash flows (actual/365)
//! - Periodic-compounding yield for fixed-contribution (SIP) plans
//! - Parallel batch evaluation and a JSON calculation history

pub mod batch;
pub mod error;
pub mod format;
pub mod history;
pub mod schedule;
pub mod solver;
pub mod yields;

// Re-export commonly used types
pub use error::{YieldError, YieldResult};
pub use schedule::{
    build_lump_sum_schedule, build_periodic_schedule, CashFlowEvent, CashFlowSchedule, Frequency, TopUp,
};
pub use solver::{SolverConfig, SolverResult, YieldMethod};
pub use yields::{solve_sip_yield, solve_yield, YieldEngine, YieldReport, YieldRequest};
pub use batch::BatchRunner;
pub use history::HistoryStore;
