//! Cash flow schedules: frequencies, term conversions and schedule construction

mod builder;
mod cashflows;
mod frequency;
pub mod term;

pub use builder::{build_lump_sum_schedule, build_periodic_schedule, TopUp};
pub use cashflows::{CashFlowEvent, CashFlowSchedule};
pub use frequency::Frequency;
pub use term::{days_between, whole_months_between, TermUnit};
