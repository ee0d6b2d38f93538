//! Take rate conversion
//!
//! The Alliance module does not charge the annualized take rate once a year.
//! It claims a fixed fraction of the stake at every claim interval. This
//! module converts an annualized take rate into that per-interval governance
//! parameter for a caller-supplied interval length.

use serde::{Deserialize, Serialize};

/// Default claim interval of the Alliance module (5 minutes)
pub const DEFAULT_TAKE_RATE_INTERVAL_MINUTES: f64 = 5.0;

/// Minutes in a 365-day year
pub const MINUTES_PER_YEAR: f64 = 365.0 * 24.0 * 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeRateSchedule {
    /// Length of one claim interval in minutes
    pub interval_minutes: f64,
    /// Minutes in the year the annualized rate refers to
    pub minutes_per_year: f64,
}

impl TakeRateSchedule {
    pub fn new(interval_minutes: f64, minutes_per_year: f64) -> Self {
        Self {
            interval_minutes,
            minutes_per_year,
        }
    }

    pub fn intervals_per_year(&self) -> f64 {
        self.minutes_per_year / self.interval_minutes
    }

    /// Per-interval take rate that removes `annualized_take_rate` of the
    /// stake after compounding over one year of intervals.
    ///
    /// A rate above 1 has no real root and yields NaN.
    pub fn parameter_for(&self, annualized_take_rate: f64) -> f64 {
        1.0 - (1.0 - annualized_take_rate).powf(1.0 / self.intervals_per_year())
    }
}

impl Default for TakeRateSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_TAKE_RATE_INTERVAL_MINUTES, MINUTES_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = TakeRateSchedule::default();
        assert_eq!(schedule.interval_minutes, 5.0);
        assert_eq!(schedule.minutes_per_year, 525_600.0);
        assert_eq!(schedule.intervals_per_year(), 105_120.0);
    }

    #[test]
    fn test_parameter_compounds_back_to_annual_rate() {
        let schedule = TakeRateSchedule::default();
        let annual = 0.02;
        let per_interval = schedule.parameter_for(annual);

        assert!(per_interval > 0.0 && per_interval < annual / 50_000.0);

        let remaining = (1.0 - per_interval).powf(schedule.intervals_per_year());
        assert!(((1.0 - remaining) - annual).abs() < 1e-9, "compounded to {}", 1.0 - remaining);
    }

    #[test]
    fn test_zero_take_rate() {
        assert_eq!(TakeRateSchedule::default().parameter_for(0.0), 0.0);
    }

    #[test]
    fn test_single_interval_is_identity() {
        let yearly = TakeRateSchedule::new(MINUTES_PER_YEAR, MINUTES_PER_YEAR);
        assert!((yearly.parameter_for(0.1) - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_take_rate_above_one_is_nan() {
        assert!(TakeRateSchedule::default().parameter_for(1.5).is_nan());
    }
}
