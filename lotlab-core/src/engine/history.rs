//! Position history — matcher state replayed after every order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matcher::match_orders;
use super::normalize::sort_chronologically;
use crate::domain::{Order, Positions};

/// Matcher state immediately after applying one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionHistoryPoint {
    pub date: DateTime<Utc>,
    pub positions: Positions,
}

/// Replays matching incrementally, one point per order in chronological
/// order.
///
/// Every prefix of the sorted tape is matched on its own, so a sell that is
/// locally invalid is caught even if a later buy would balance the tape —
/// stricter than `match_orders`, which only validates the final balance.
/// Returns `None` as soon as any prefix oversells; an empty tape yields
/// `Some(vec![])` ("no data yet" stays distinguishable from "invalid
/// history").
pub fn position_history(orders: &[Order]) -> Option<Vec<PositionHistoryPoint>> {
    let sorted = sort_chronologically(orders);
    let mut points = Vec::with_capacity(sorted.len());

    for end in 1..=sorted.len() {
        let prefix = &sorted[..end];
        let positions = match_orders(prefix).ok()?;
        points.push(PositionHistoryPoint {
            date: prefix[end - 1].timestamp,
            positions,
        });
    }

    Some(points)
}
