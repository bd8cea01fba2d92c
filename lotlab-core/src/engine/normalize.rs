//! Chronological order normalization.

use crate::domain::Order;

/// Returns the orders stably sorted ascending by timestamp.
///
/// The sort must be stable: orders sharing a timestamp keep their relative
/// input order, which pins down FIFO matching when several orders land on
/// the same instant. The input is not mutated.
pub fn sort_chronologically(orders: &[Order]) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by_key(|o| o.timestamp);
    sorted
}
