//! Yield evaluation for lump-sum, dated periodic and SIP requests

mod engine;
mod report;
mod request;

pub use engine::{solve_sip_yield, solve_yield, YieldEngine};
pub use report::YieldReport;
pub use request::{LumpSumRequest, PeriodicPlanRequest, YieldRequest};
