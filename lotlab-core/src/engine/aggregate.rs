//! Portfolio aggregation — scalar metrics over matched positions.
//!
//! Every query here is total: a missing asset, an empty order list, or an
//! oversold tape degrades to the aggregation identity (0.0) instead of an
//! error, so display layers stay total functions of their input. Callers
//! that need to distinguish "invalid history" from "zero" use
//! `position_history` instead.

use serde::{Deserialize, Serialize};

use super::matcher::match_orders;
use crate::domain::{AssetId, Portfolio, Positions};

/// Which position set a query reduces over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionFilter {
    Open,
    Closed,
    Both,
}

fn matched(portfolio: &Portfolio, asset_id: &AssetId) -> Option<Positions> {
    let orders = portfolio.orders_for(asset_id);
    if orders.is_empty() {
        return None;
    }
    match_orders(orders).ok()
}

fn reduce(
    positions: &Positions,
    filter: PositionFilter,
    open_term: impl Fn(&Positions) -> f64,
    closed_term: impl Fn(&Positions) -> f64,
) -> f64 {
    match filter {
        PositionFilter::Open => open_term(positions),
        PositionFilter::Closed => closed_term(positions),
        PositionFilter::Both => open_term(positions) + closed_term(positions),
    }
}

/// Sum of pieces in the selected position set.
pub fn pieces_of(portfolio: &Portfolio, asset_id: &AssetId, filter: PositionFilter) -> f64 {
    matched(portfolio, asset_id)
        .map(|p| reduce(&p, filter, Positions::open_pieces, Positions::closed_pieces))
        .unwrap_or(0.0)
}

/// Sum of `pieces * buy_price` in the selected position set.
pub fn initial_value_of(portfolio: &Portfolio, asset_id: &AssetId, filter: PositionFilter) -> f64 {
    matched(portfolio, asset_id)
        .map(|p| {
            reduce(
                &p,
                filter,
                Positions::invested_value,
                |p| p.closed.iter().map(|c| c.pieces * c.buy_price).sum(),
            )
        })
        .unwrap_or(0.0)
}

/// Sum of `pieces * sell_price` over closed lots. Open lots have no sell
/// price, so there is no open variant.
pub fn end_value_of(portfolio: &Portfolio, asset_id: &AssetId) -> f64 {
    matched(portfolio, asset_id)
        .map(|p| p.realized_value())
        .unwrap_or(0.0)
}

/// Sum of `order_fee` in the selected position set.
pub fn order_fees_of(portfolio: &Portfolio, asset_id: &AssetId, filter: PositionFilter) -> f64 {
    matched(portfolio, asset_id)
        .map(|p| {
            reduce(
                &p,
                filter,
                |p| p.open.iter().map(|o| o.order_fee).sum(),
                |p| p.closed.iter().map(|c| c.order_fee).sum(),
            )
        })
        .unwrap_or(0.0)
}

/// Realized profit net of fees: `sum(closed, pieces*(sell-buy) - fee)`.
pub fn realized_gains_of(portfolio: &Portfolio, asset_id: &AssetId) -> f64 {
    matched(portfolio, asset_id)
        .map(|p| p.realized_gains())
        .unwrap_or(0.0)
}

// ─── Portfolio-level totals ──────────────────────────────────────────

/// Sum of `pieces_of` across every asset in the portfolio.
pub fn portfolio_pieces(portfolio: &Portfolio, filter: PositionFilter) -> f64 {
    portfolio
        .asset_ids()
        .map(|id| pieces_of(portfolio, id, filter))
        .sum()
}

/// Sum of `initial_value_of` across every asset in the portfolio.
pub fn portfolio_initial_value(portfolio: &Portfolio, filter: PositionFilter) -> f64 {
    portfolio
        .asset_ids()
        .map(|id| initial_value_of(portfolio, id, filter))
        .sum()
}

/// Sum of `end_value_of` across every asset in the portfolio.
pub fn portfolio_end_value(portfolio: &Portfolio) -> f64 {
    portfolio
        .asset_ids()
        .map(|id| end_value_of(portfolio, id))
        .sum()
}

/// Sum of `order_fees_of` across every asset in the portfolio.
pub fn portfolio_order_fees(portfolio: &Portfolio, filter: PositionFilter) -> f64 {
    portfolio
        .asset_ids()
        .map(|id| order_fees_of(portfolio, id, filter))
        .sum()
}

/// Sum of `realized_gains_of` across every asset in the portfolio.
pub fn portfolio_realized_gains(portfolio: &Portfolio) -> f64 {
    portfolio
        .asset_ids()
        .map(|id| realized_gains_of(portfolio, id))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderId};
    use chrono::{TimeZone, Utc};

    fn order(asset: &str, id: &str, pieces: f64, price: f64, fee: f64, day: u32) -> Order {
        Order {
            id: OrderId::new(id),
            asset_id: AssetId::new(asset),
            pieces,
            share_price: price,
            order_fee: fee,
            timestamp: Utc.with_ymd_and_hms(2022, 6, day, 0, 0, 0).unwrap(),
        }
    }

    fn sample_portfolio() -> Portfolio {
        // AAPL: buy 2@50 fee 1, sell 1@55 fee 1
        // SAP: buy 3@100 fee 2, never sold
        Portfolio::new("test")
            .with_order(order("AAPL", "a1", 2.0, 50.0, 1.0, 1))
            .with_order(order("AAPL", "a2", -1.0, 55.0, 1.0, 10))
            .with_order(order("SAP", "s1", 3.0, 100.0, 2.0, 2))
    }

    #[test]
    fn pieces_by_filter() {
        let portfolio = sample_portfolio();
        let aapl = AssetId::new("AAPL");
        assert_eq!(pieces_of(&portfolio, &aapl, PositionFilter::Open), 1.0);
        assert_eq!(pieces_of(&portfolio, &aapl, PositionFilter::Closed), 1.0);
        assert_eq!(pieces_of(&portfolio, &aapl, PositionFilter::Both), 2.0);
    }

    #[test]
    fn initial_value_by_filter() {
        let portfolio = sample_portfolio();
        let aapl = AssetId::new("AAPL");
        assert_eq!(initial_value_of(&portfolio, &aapl, PositionFilter::Open), 50.0);
        assert_eq!(initial_value_of(&portfolio, &aapl, PositionFilter::Closed), 50.0);
        assert_eq!(initial_value_of(&portfolio, &aapl, PositionFilter::Both), 100.0);
    }

    #[test]
    fn end_value_is_closed_only() {
        let portfolio = sample_portfolio();
        assert_eq!(end_value_of(&portfolio, &AssetId::new("AAPL")), 55.0);
        assert_eq!(end_value_of(&portfolio, &AssetId::new("SAP")), 0.0);
    }

    #[test]
    fn fees_are_redistributed_not_lost() {
        let portfolio = sample_portfolio();
        let aapl = AssetId::new("AAPL");
        assert_eq!(order_fees_of(&portfolio, &aapl, PositionFilter::Open), 0.5);
        assert_eq!(order_fees_of(&portfolio, &aapl, PositionFilter::Closed), 1.5);
        assert_eq!(order_fees_of(&portfolio, &aapl, PositionFilter::Both), 2.0);
    }

    #[test]
    fn realized_gains_net_of_fees() {
        let portfolio = sample_portfolio();
        // 1 * (55 - 50) - 1.5
        assert_eq!(realized_gains_of(&portfolio, &AssetId::new("AAPL")), 3.5);
    }

    #[test]
    fn missing_asset_degrades_to_zero() {
        let portfolio = sample_portfolio();
        let ghost = AssetId::new("GHOST");
        assert_eq!(pieces_of(&portfolio, &ghost, PositionFilter::Both), 0.0);
        assert_eq!(initial_value_of(&portfolio, &ghost, PositionFilter::Both), 0.0);
        assert_eq!(end_value_of(&portfolio, &ghost), 0.0);
        assert_eq!(order_fees_of(&portfolio, &ghost, PositionFilter::Both), 0.0);
        assert_eq!(realized_gains_of(&portfolio, &ghost), 0.0);
    }

    #[test]
    fn oversold_asset_degrades_to_zero() {
        let portfolio = Portfolio::new("test")
            .with_order(order("AAPL", "b", 2.0, 50.0, 0.0, 1))
            .with_order(order("AAPL", "s", -3.0, 55.0, 0.0, 10));
        let aapl = AssetId::new("AAPL");
        assert_eq!(pieces_of(&portfolio, &aapl, PositionFilter::Both), 0.0);
        assert_eq!(realized_gains_of(&portfolio, &aapl), 0.0);
    }

    #[test]
    fn portfolio_totals_sum_across_assets() {
        let portfolio = sample_portfolio();
        assert_eq!(portfolio_pieces(&portfolio, PositionFilter::Open), 4.0);
        assert_eq!(portfolio_initial_value(&portfolio, PositionFilter::Open), 350.0);
        assert_eq!(portfolio_end_value(&portfolio), 55.0);
        assert_eq!(portfolio_order_fees(&portfolio, PositionFilter::Both), 4.0);
        assert_eq!(portfolio_realized_gains(&portfolio), 3.5);
    }
}
