//! Batch evaluation of many yield requests
//!
//! Requests are independent, so a batch is spread across threads with rayon
//! and the reports come back in input order.

pub mod loader;

pub use loader::{load_requests, load_requests_from_reader, parse_top_up, parse_top_ups};

use rayon::prelude::*;
use std::path::Path;

use crate::error::YieldResult;
use crate::solver::SolverConfig;
use crate::yields::{YieldEngine, YieldReport, YieldRequest};

/// Evaluates batches of requests with one shared solver configuration
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new();
/// let requests = load_requests("requests.csv")?;
/// for report in runner.run_batch(&requests) {
///     println!("{:.4}", report.rate());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: YieldEngine,
}

impl BatchRunner {
    /// Runner with the default solver settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with explicit solver settings
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            engine: YieldEngine::new(config),
        }
    }

    /// Evaluate a single request
    pub fn run(&self, request: &YieldRequest) -> YieldReport {
        self.engine.evaluate(request)
    }

    /// Evaluate many requests in parallel, preserving order
    pub fn run_batch(&self, requests: &[YieldRequest]) -> Vec<YieldReport> {
        requests
            .par_iter()
            .map(|request| self.engine.evaluate(request))
            .collect()
    }

    /// Load requests from a CSV file and evaluate them
    pub fn run_csv<P: AsRef<Path>>(&self, path: P) -> YieldResult<Vec<(YieldRequest, YieldReport)>> {
        let requests = load_requests(path)?;
        let reports = self.run_batch(&requests);
        Ok(requests.into_iter().zip(reports).collect())
    }

    pub fn engine(&self) -> &YieldEngine {
        &self.engine
    }
}
