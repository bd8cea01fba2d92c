//! Report building — per-asset rows and portfolio totals.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use lotlab_core::domain::{AssetId, AssetLibrary, Portfolio};
use lotlab_core::engine::{
    end_value_of, initial_value_of, match_orders, order_fees_of, pieces_of, realized_gains_of,
    PositionFilter,
};

use crate::snapshot::snapshot_hash;

/// Bumped whenever the persisted report shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 1;

/// One asset's metrics within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub asset_id: AssetId,
    /// Display label; falls back to the raw id when the asset library has
    /// no entry (partially loaded data is not an error).
    pub label: String,
    pub isin: Option<String>,
    /// Pieces currently held (open lots).
    pub pieces_held: f64,
    /// Cost basis of the open lots.
    pub invested_value: f64,
    /// Sell-side proceeds of the closed lots.
    pub end_value: f64,
    /// Fees across open and closed lots.
    pub order_fees: f64,
    /// Realized profit net of fees.
    pub realized_gains: f64,
    /// True when the asset's tape oversells; all metrics degrade to zero.
    pub oversold: bool,
}

/// A full portfolio report: one row per asset plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub schema_version: u32,
    pub portfolio: String,
    /// Content hash of the portfolio snapshot this report was built from.
    pub snapshot_hash: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub rows: Vec<AssetReport>,
    pub total_invested_value: f64,
    pub total_end_value: f64,
    pub total_order_fees: f64,
    pub total_realized_gains: f64,
    pub cash_balance: f64,
}

fn build_row(portfolio: &Portfolio, assets: &AssetLibrary, asset_id: &AssetId) -> AssetReport {
    let oversold = match_orders(portfolio.orders_for(asset_id)).is_err();
    AssetReport {
        asset_id: asset_id.clone(),
        label: assets.label_for(asset_id),
        isin: assets.get(asset_id).map(|a| a.isin.clone()),
        pieces_held: pieces_of(portfolio, asset_id, PositionFilter::Open),
        invested_value: initial_value_of(portfolio, asset_id, PositionFilter::Open),
        end_value: end_value_of(portfolio, asset_id),
        order_fees: order_fees_of(portfolio, asset_id, PositionFilter::Both),
        realized_gains: realized_gains_of(portfolio, asset_id),
        oversold,
    }
}

/// Builds the report for one portfolio against an asset library snapshot.
///
/// Assets are matched independently, so rows are computed in parallel; row
/// order stays deterministic (the portfolio's BTreeMap key order).
pub fn build_report(portfolio: &Portfolio, assets: &AssetLibrary) -> PortfolioReport {
    let asset_ids: Vec<&AssetId> = portfolio.asset_ids().collect();
    let rows: Vec<AssetReport> = asset_ids
        .par_iter()
        .map(|id| build_row(portfolio, assets, id))
        .collect();

    PortfolioReport {
        schema_version: SCHEMA_VERSION,
        portfolio: portfolio.name.clone(),
        snapshot_hash: snapshot_hash(portfolio),
        generated_at: chrono::Utc::now(),
        total_invested_value: rows.iter().map(|r| r.invested_value).sum(),
        total_end_value: rows.iter().map(|r| r.end_value).sum(),
        total_order_fees: rows.iter().map(|r| r.order_fees).sum(),
        total_realized_gains: rows.iter().map(|r| r.realized_gains).sum(),
        cash_balance: portfolio.cash_balance(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lotlab_core::domain::{Asset, Order, OrderId};

    fn order(asset: &str, id: &str, pieces: f64, price: f64, fee: f64, day: u32) -> Order {
        Order {
            id: OrderId::new(id),
            asset_id: AssetId::new(asset),
            pieces,
            share_price: price,
            order_fee: fee,
            timestamp: Utc.with_ymd_and_hms(2022, 7, day, 0, 0, 0).unwrap(),
        }
    }

    fn sample_portfolio() -> Portfolio {
        Portfolio::new("sample")
            .with_order(order("AAPL", "a1", 2.0, 50.0, 1.0, 1))
            .with_order(order("AAPL", "a2", -1.0, 55.0, 1.0, 10))
            .with_order(order("SAP", "s1", 3.0, 100.0, 2.0, 2))
    }

    fn sample_assets() -> AssetLibrary {
        let mut library = AssetLibrary::new();
        library.insert(
            AssetId::new("AAPL"),
            Asset {
                display_name: "Apple Inc.".into(),
                isin: "US0378331005".into(),
                wkn: Some("865985".into()),
            },
        );
        library
    }

    #[test]
    fn report_has_one_row_per_asset_in_key_order() {
        let report = build_report(&sample_portfolio(), &sample_assets());
        let ids: Vec<&str> = report.rows.iter().map(|r| r.asset_id.0.as_str()).collect();
        assert_eq!(ids, vec!["AAPL", "SAP"]);
    }

    #[test]
    fn known_asset_gets_library_label() {
        let report = build_report(&sample_portfolio(), &sample_assets());
        assert_eq!(report.rows[0].label, "Apple Inc.");
        assert_eq!(report.rows[0].isin.as_deref(), Some("US0378331005"));
    }

    #[test]
    fn unknown_asset_degrades_to_id_label() {
        let report = build_report(&sample_portfolio(), &sample_assets());
        assert_eq!(report.rows[1].label, "SAP");
        assert_eq!(report.rows[1].isin, None);
    }

    #[test]
    fn row_metrics_match_aggregator() {
        let report = build_report(&sample_portfolio(), &sample_assets());
        let aapl = &report.rows[0];
        assert_eq!(aapl.pieces_held, 1.0);
        assert_eq!(aapl.invested_value, 50.0);
        assert_eq!(aapl.end_value, 55.0);
        assert_eq!(aapl.order_fees, 2.0);
        assert_eq!(aapl.realized_gains, 3.5);
        assert!(!aapl.oversold);
    }

    #[test]
    fn totals_sum_rows() {
        let report = build_report(&sample_portfolio(), &sample_assets());
        assert_eq!(report.total_invested_value, 350.0);
        assert_eq!(report.total_end_value, 55.0);
        assert_eq!(report.total_order_fees, 4.0);
        assert_eq!(report.total_realized_gains, 3.5);
    }

    #[test]
    fn oversold_asset_is_flagged_with_zero_row() {
        let portfolio = Portfolio::new("bad")
            .with_order(order("AAPL", "b", 2.0, 50.0, 0.0, 1))
            .with_order(order("AAPL", "s", -3.0, 55.0, 0.0, 10));
        let report = build_report(&portfolio, &sample_assets());
        let row = &report.rows[0];
        assert!(row.oversold);
        assert_eq!(row.pieces_held, 0.0);
        assert_eq!(row.realized_gains, 0.0);
    }

    #[test]
    fn snapshot_hash_is_stable_across_builds() {
        let portfolio = sample_portfolio();
        let assets = sample_assets();
        let a = build_report(&portfolio, &assets);
        let b = build_report(&portfolio, &assets);
        assert_eq!(a.snapshot_hash, b.snapshot_hash);
        assert_eq!(a.rows, b.rows);
    }
}
