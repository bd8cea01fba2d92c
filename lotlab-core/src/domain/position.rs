//! Open and closed lots — the output of FIFO matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lot (or lot fragment) not yet sold.
///
/// Carries the prorated share of fees paid so far, so that splitting a lot
/// never creates or destroys fee money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Piece count, always > 0.
    pub pieces: f64,
    pub buy_price: f64,
    pub buy_date: DateTime<Utc>,
    pub order_fee: f64,
}

/// A lot (or fragment) fully matched against a sell.
///
/// `order_fee` is the prorated buy-side fee plus the prorated sell-side fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPosition {
    pub pieces: f64,
    pub buy_price: f64,
    pub buy_date: DateTime<Utc>,
    pub order_fee: f64,
    pub sell_price: f64,
    pub sell_date: DateTime<Utc>,
}

impl ClosedPosition {
    /// Realized gain of this lot net of its fee share.
    pub fn gain(&self) -> f64 {
        self.pieces * (self.sell_price - self.buy_price) - self.order_fee
    }
}

/// The complete matching result for one asset at one point in time.
///
/// Invariant (when matching succeeds): open pieces plus closed pieces equal
/// the total bought pieces, and closed pieces equal the total sold pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    pub open: Vec<OpenPosition>,
    pub closed: Vec<ClosedPosition>,
}

impl Positions {
    pub fn open_pieces(&self) -> f64 {
        self.open.iter().map(|p| p.pieces).sum()
    }

    pub fn closed_pieces(&self) -> f64 {
        self.closed.iter().map(|p| p.pieces).sum()
    }

    /// Cost basis of the open lots: `sum(pieces * buy_price)`.
    pub fn invested_value(&self) -> f64 {
        self.open.iter().map(|p| p.pieces * p.buy_price).sum()
    }

    /// Sell-side proceeds of the closed lots: `sum(pieces * sell_price)`.
    pub fn realized_value(&self) -> f64 {
        self.closed.iter().map(|p| p.pieces * p.sell_price).sum()
    }

    /// Fees carried by open and closed lots together.
    pub fn total_fees(&self) -> f64 {
        let open: f64 = self.open.iter().map(|p| p.order_fee).sum();
        let closed: f64 = self.closed.iter().map(|p| p.order_fee).sum();
        open + closed
    }

    /// Realized profit net of fees across all closed lots.
    pub fn realized_gains(&self) -> f64 {
        self.closed.iter().map(|p| p.gain()).sum()
    }
}
