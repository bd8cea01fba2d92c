//! Order and cash transaction types.

use super::ids::{AssetId, OrderId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single buy or sell of one asset.
///
/// `pieces` is signed: positive buys, negative sells; the magnitude is the
/// piece count traded. Orders are immutable once created and identified by
/// `id` for removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub asset_id: AssetId,
    pub pieces: f64,
    /// Price per piece at execution.
    pub share_price: f64,
    /// Absolute fee charged for this order.
    pub order_fee: f64,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn is_buy(&self) -> bool {
        self.pieces > 0.0
    }

    pub fn is_sell(&self) -> bool {
        self.pieces < 0.0
    }

    /// Signed order volume: `pieces * share_price`.
    pub fn volume(&self) -> f64 {
        self.pieces * self.share_price
    }
}

/// A cash movement on the portfolio (deposit when positive, withdrawal when
/// negative). Never enters lot matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashTransaction {
    pub id: TransactionId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}
