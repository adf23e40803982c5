//! Load yield requests from CSV
//!
//! Columns: `kind,initial,periodic,frequency,start,end,months,final,top_ups`.
//! `kind` is `lump-sum`, `plan` or `sip`; unused columns may be empty.
//! `top_ups` holds `;`-separated `YYYY-MM-DD:amount` pairs.

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use crate::error::{YieldError, YieldResult};
use crate::schedule::{Frequency, TopUp};
use crate::solver::sip::SipParams;
use crate::yields::{LumpSumRequest, PeriodicPlanRequest, YieldRequest};

/// Raw CSV row; validated per request kind
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    kind: String,
    initial: f64,
    periodic: Option<f64>,
    frequency: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    months: Option<i64>,
    #[serde(rename = "final")]
    final_amount: f64,
    top_ups: Option<String>,
}

fn required<T>(value: Option<T>, column: &str, kind: &str) -> YieldResult<T> {
    value.ok_or_else(|| YieldError::invalid_input(format!("{} row is missing `{}`", kind, column)))
}

impl CsvRow {
    fn frequency(&self) -> YieldResult<Frequency> {
        match self.frequency.as_deref() {
            Some(f) if !f.trim().is_empty() => f.parse(),
            _ => Ok(Frequency::default()),
        }
    }

    fn to_request(self) -> YieldResult<YieldRequest> {
        match self.kind.trim() {
            "lump-sum" | "lump" => Ok(YieldRequest::LumpSum(LumpSumRequest {
                initial_amount: self.initial,
                start_date: required(self.start, "start", "lump-sum")?,
                top_ups: parse_top_ups(self.top_ups.as_deref().unwrap_or(""))?,
                final_amount: self.final_amount,
                end_date: required(self.end, "end", "lump-sum")?,
            })),
            "plan" | "periodic-plan" => Ok(YieldRequest::PeriodicPlan(PeriodicPlanRequest {
                initial_amount: self.initial,
                periodic_amount: required(self.periodic, "periodic", "plan")?,
                frequency: self.frequency()?,
                start_date: required(self.start, "start", "plan")?,
                end_date: required(self.end, "end", "plan")?,
                final_amount: self.final_amount,
            })),
            "sip" => Ok(YieldRequest::Sip(SipParams {
                initial_amount: self.initial,
                periodic_amount: required(self.periodic, "periodic", "sip")?,
                months: required(self.months, "months", "sip")?,
                frequency: self.frequency()?,
                final_amount: self.final_amount,
            })),
            other => Err(YieldError::invalid_input(format!("Unknown request kind: {}", other))),
        }
    }
}

/// Parse `YYYY-MM-DD:amount` pairs separated by `;`
pub fn parse_top_ups(text: &str) -> YieldResult<Vec<TopUp>> {
    text.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_top_up)
        .collect()
}

/// Parse a single `YYYY-MM-DD:amount` pair
pub fn parse_top_up(item: &str) -> YieldResult<TopUp> {
    let (date, amount) = item
        .split_once(':')
        .ok_or_else(|| YieldError::invalid_input(format!("Top-up `{}` is not DATE:AMOUNT", item)))?;

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| YieldError::invalid_input(format!("Top-up date `{}`: {}", date, e)))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| YieldError::invalid_input(format!("Top-up amount `{}` is not a number", amount)))?;

    Ok(TopUp::new(amount, date))
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> YieldResult<Vec<YieldRequest>> {
    let reader = Reader::from_path(path)?;
    collect_requests(reader)
}

/// Load requests from any reader (e.g., string buffer, stdin)
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> YieldResult<Vec<YieldRequest>> {
    collect_requests(Reader::from_reader(reader))
}

fn collect_requests<R: std::io::Read>(mut reader: Reader<R>) -> YieldResult<Vec<YieldRequest>> {
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    log::debug!("Loaded {} requests", requests.len());
    Ok(requests)
}
