//! Contribution frequency and its three conversion tables
//!
//! The tables are independent on purpose: the SIP solver compounds with
//! `periods_per_year`, schedule construction steps with `interval_days`, and
//! contribution amounts are rescaled from a monthly-equivalent figure with
//! `normalize_monthly_amount`. They do not agree with each other (52 weeks
//! vs 7-day steps vs 30/7 weeks per month) and must not be unified.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::YieldError;

/// Contribution frequency of a periodic plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Day,
    Week,
    Biweek,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Day,
        Frequency::Week,
        Frequency::Biweek,
        Frequency::Month,
        Frequency::Quarter,
        Frequency::Year,
    ];

    /// Compounding periods per year used by the SIP solver
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Day => 365,
            Frequency::Week => 52,
            Frequency::Biweek => 26,
            Frequency::Month => 12,
            Frequency::Quarter => 4,
            Frequency::Year => 1,
        }
    }

    /// Calendar days between contributions when building a schedule
    pub fn interval_days(&self) -> u32 {
        match self {
            Frequency::Day => 1,
            Frequency::Week => 7,
            Frequency::Biweek => 14,
            Frequency::Month => 30,
            Frequency::Quarter => 90,
            Frequency::Year => 365,
        }
    }

    /// Rescale a monthly-equivalent contribution to this frequency's per-period amount
    pub fn normalize_monthly_amount(&self, monthly_amount: f64) -> f64 {
        match self {
            Frequency::Day => monthly_amount / 30.0,
            Frequency::Week => monthly_amount / (30.0 / 7.0),
            Frequency::Biweek => monthly_amount / (30.0 / 14.0),
            Frequency::Month => monthly_amount,
            Frequency::Quarter => monthly_amount * 3.0,
            Frequency::Year => monthly_amount * 12.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Day => "day",
            Frequency::Week => "week",
            Frequency::Biweek => "biweek",
            Frequency::Month => "month",
            Frequency::Quarter => "quarter",
            Frequency::Year => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Frequency::Day),
            "week" | "weekly" => Ok(Frequency::Week),
            "biweek" | "biweekly" => Ok(Frequency::Biweek),
            "month" | "monthly" => Ok(Frequency::Month),
            "quarter" | "quarterly" => Ok(Frequency::Quarter),
            "year" | "yearly" | "annual" => Ok(Frequency::Year),
            other => Err(YieldError::invalid_input(format!(
                "Unknown frequency: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_conversion_tables() {
        let expected = [
            (Frequency::Day, 365, 1),
            (Frequency::Week, 52, 7),
            (Frequency::Biweek, 26, 14),
            (Frequency::Month, 12, 30),
            (Frequency::Quarter, 4, 90),
            (Frequency::Year, 1, 365),
        ];
        for (freq, periods, days) in expected {
            assert_eq!(freq.periods_per_year(), periods, "{}", freq);
            assert_eq!(freq.interval_days(), days, "{}", freq);
        }
    }

    #[test]
    fn test_monthly_amount_normalization() {
        assert_relative_eq!(Frequency::Day.normalize_monthly_amount(3000.0), 100.0);
        assert_relative_eq!(Frequency::Week.normalize_monthly_amount(3000.0), 700.0, epsilon = 1e-9);
        assert_relative_eq!(Frequency::Biweek.normalize_monthly_amount(3000.0), 1400.0, epsilon = 1e-9);
        assert_relative_eq!(Frequency::Month.normalize_monthly_amount(3000.0), 3000.0);
        assert_relative_eq!(Frequency::Quarter.normalize_monthly_amount(3000.0), 9000.0);
        assert_relative_eq!(Frequency::Year.normalize_monthly_amount(3000.0), 36000.0);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for freq in Frequency::ALL {
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
        assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Month);
        assert!("fortnight".parse::<Frequency>().is_err());
    }
}
