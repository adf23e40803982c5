//! Request types accepted by the yield engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::{Frequency, TopUp};
use crate::solver::sip::SipParams;

/// A lump-sum investment with optional top-ups, valued at `end_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumRequest {
    pub initial_amount: f64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub top_ups: Vec<TopUp>,
    pub final_amount: f64,
    pub end_date: NaiveDate,
}

/// A dated periodic plan, solved as XIRR over its contribution schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicPlanRequest {
    pub initial_amount: f64,
    /// Monthly-equivalent contribution
    pub periodic_amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Current market value of the plan
    pub final_amount: f64,
}

/// Any request the engine can evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum YieldRequest {
    LumpSum(LumpSumRequest),
    PeriodicPlan(PeriodicPlanRequest),
    Sip(SipParams),
}

impl YieldRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            YieldRequest::LumpSum(_) => "lump-sum",
            YieldRequest::PeriodicPlan(_) => "periodic-plan",
            YieldRequest::Sip(_) => "sip",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_json() {
        let json = r#"{
            "kind": "lump-sum",
            "initial_amount": 10000.0,
            "start_date": "2023-01-01",
            "final_amount": 12000.0,
            "end_date": "2024-01-01"
        }"#;
        let request: YieldRequest = serde_json::from_str(json).unwrap();
        match &request {
            YieldRequest::LumpSum(lump) => {
                assert!(lump.top_ups.is_empty());
                assert_eq!(lump.end_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert_eq!(request.kind(), "lump-sum");

        let sip = r#"{"kind":"sip","initial_amount":0,"periodic_amount":500,"months":24,"frequency":"week","final_amount":13000}"#;
        let request: YieldRequest = serde_json::from_str(sip).unwrap();
        assert!(matches!(request, YieldRequest::Sip(SipParams { frequency: Frequency::Week, .. })));
    }
}
