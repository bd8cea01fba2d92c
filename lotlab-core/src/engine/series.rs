//! Series derivers — project a position history into chartable
//! (timestamp, value) sequences.

use serde::{Deserialize, Serialize};

use super::history::PositionHistoryPoint;
use super::normalize::sort_chronologically;
use crate::domain::{Order, Positions};

/// One sample of a time series. `timestamp` is unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint<T> {
    pub timestamp: i64,
    pub value: T,
}

/// A time-ordered sequence of samples.
pub type Series<T> = Vec<SeriesPoint<T>>;

/// Projects a position history into a series for an arbitrary metric.
pub fn metric_series<T>(
    history: &[PositionHistoryPoint],
    metric: impl Fn(&Positions) -> T,
) -> Series<T> {
    history
        .iter()
        .map(|point| SeriesPoint {
            timestamp: point.date.timestamp_millis(),
            value: metric(&point.positions),
        })
        .collect()
}

/// Invested value of the open lots at each point in time:
/// `sum(open, pieces * buy_price)`.
pub fn invested_value_series(history: &[PositionHistoryPoint]) -> Series<f64> {
    metric_series(history, Positions::invested_value)
}

/// Running signed order volume (`pieces * share_price`) over the
/// time-sorted tape, without lot matching.
///
/// Cheaper than the lot-based series but only an approximation: it does not
/// separate realized from unrealized value and must not be conflated with
/// `invested_value_series`.
pub fn cumulative_volume_series(orders: &[Order]) -> Series<f64> {
    let sorted = sort_chronologically(orders);
    let mut running = 0.0;
    sorted
        .iter()
        .map(|order| {
            running += order.volume();
            SeriesPoint {
                timestamp: order.timestamp.timestamp_millis(),
                value: running,
            }
        })
        .collect()
}
