use crate::core::pool::{Pool, PoolLedger};
use crate::engine::history::HistoryStore;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Number of points in every forecast.
pub const FORECAST_POINTS: usize = 10;

/// Trailing transactions considered when estimating the trend.
pub const TREND_WINDOW: usize = 10;

/// Linear extrapolation of the fiat pool.
///
/// The trend is the mean fiat-pool delta over the trailing window; a
/// transaction that never touched the fiat pool contributes zero to the
/// sum but still counts in the denominator. The projection starts from the
/// current balance and adds the trend per step with no damping, so it can
/// run negative indefinitely.
///
/// Recomputed fresh on every read, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandForecast {
    pub trend: Decimal,
    pub points: Vec<Decimal>,
}

impl DemandForecast {
    pub fn from_history(history: &HistoryStore, pools: &PoolLedger) -> Self {
        let window = history.trailing(TREND_WINDOW);
        let trend = if window.is_empty() {
            Decimal::ZERO
        } else {
            let total: Decimal = window.iter().map(|tx| tx.pool_delta(Pool::Fiat)).sum();
            total / Decimal::from(window.len() as u64)
        };

        let mut points = Vec::with_capacity(FORECAST_POINTS);
        let mut level = pools.balance(Pool::Fiat);
        for _ in 0..FORECAST_POINTS {
            level += trend;
            points.push(level);
        }

        Self { trend, points }
    }
}

impl fmt::Display for DemandForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trend {:+} per tx, next {} steps:", self.trend, self.points.len())?;
        for point in &self.points {
            write!(f, " {point}")?;
        }
        Ok(())
    }
}
