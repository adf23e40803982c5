//! Dated cash flow events and the schedules built from them

use serde::{Deserialize, Serialize};

use crate::error::{YieldError, YieldResult};

/// A single signed cash flow at a whole-day offset from the first event
///
/// Negative amounts leave the investor (contributions), positive amounts
/// return to the investor (withdrawals or the terminal valuation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEvent {
    pub amount: f64,
    pub day_offset: u32,
}

impl CashFlowEvent {
    pub fn new(amount: f64, day_offset: u32) -> Self {
        Self { amount, day_offset }
    }

    /// Offset expressed in 365-day years
    pub fn years(&self) -> f64 {
        self.day_offset as f64 / 365.0
    }
}

/// Ordered sequence of cash flow events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    events: Vec<CashFlowEvent>,
}

impl CashFlowSchedule {
    /// Build a schedule from explicit events
    ///
    /// The first event must sit at day 0 and offsets must be non-decreasing.
    /// Sign patterns are not checked here; the engine handles degenerate ones.
    pub fn new(events: Vec<CashFlowEvent>) -> YieldResult<Self> {
        let first = events.first().ok_or(YieldError::EmptySchedule)?;
        if first.day_offset != 0 {
            return Err(YieldError::UnorderedSchedule { index: 0 });
        }
        if let Some(index) = events
            .windows(2)
            .position(|pair| pair[1].day_offset < pair[0].day_offset)
        {
            return Err(YieldError::UnorderedSchedule { index: index + 1 });
        }
        Ok(Self { events })
    }

    /// Build from (amount, day offset) pairs
    pub fn from_pairs(pairs: &[(f64, u32)]) -> YieldResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(amount, day_offset)| CashFlowEvent::new(amount, day_offset))
                .collect(),
        )
    }

    /// Used by the builders, which establish ordering themselves
    pub(crate) fn from_sorted(mut events: Vec<CashFlowEvent>) -> Self {
        // Stable: events on the same day keep insertion order
        events.sort_by_key(|e| e.day_offset);
        Self { events }
    }

    pub fn events(&self) -> &[CashFlowEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&CashFlowEvent> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&CashFlowEvent> {
        self.events.last()
    }

    /// Day offset of the last event
    pub fn total_days(&self) -> u32 {
        self.events.last().map(|e| e.day_offset).unwrap_or(0)
    }

    /// Non-zero events strictly between the first and the last
    pub fn interior_events(&self) -> impl Iterator<Item = &CashFlowEvent> {
        let end = self.events.len().saturating_sub(1);
        self.events
            .get(1..end)
            .unwrap_or(&[])
            .iter()
            .filter(|e| e.amount != 0.0)
    }

    pub fn has_interior_contributions(&self) -> bool {
        self.interior_events().next().is_some()
    }

    /// True when money flows both ways, the precondition for a finite root
    pub fn has_sign_change(&self) -> bool {
        let has_positive = self.events.iter().any(|e| e.amount > 0.0);
        let has_negative = self.events.iter().any(|e| e.amount < 0.0);
        has_positive && has_negative
    }

    /// Initial principal as a positive number
    pub fn initial_amount(&self) -> f64 {
        self.events.first().map(|e| -e.amount).unwrap_or(0.0)
    }

    /// Terminal value returned to the investor
    pub fn final_amount(&self) -> f64 {
        if self.events.len() < 2 {
            return 0.0;
        }
        self.events.last().map(|e| e.amount).unwrap_or(0.0)
    }

    /// Sum of the interior contributions, sign flipped to positive
    pub fn total_contributions(&self) -> f64 {
        self.interior_events()
            .filter(|e| e.amount < 0.0)
            .map(|e| -e.amount)
            .sum()
    }

    /// Net present value at annual rate `rate` on an actual/365 basis
    pub fn npv(&self, rate: f64) -> f64 {
        self.events
            .iter()
            .map(|e| {
                if e.day_offset == 0 {
                    e.amount
                } else {
                    e.amount / (1.0 + rate).powf(e.years())
                }
            })
            .sum()
    }
}
