//! Portfolio — per-asset order lists plus cash transactions.

use super::ids::{AssetId, OrderId};
use super::order::{CashTransaction, Order};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One portfolio: orders grouped by asset for independent per-asset
/// matching, plus cash transactions.
///
/// Orders are never mutated in place; adding appends in chronological
/// position and removing filters by id, so the per-asset lists stay sorted
/// by timestamp — the shape the normalizer relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub orders: BTreeMap<AssetId, Vec<Order>>,
    pub transactions: Vec<CashTransaction>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orders: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Orders for one asset, empty when the asset is absent.
    pub fn orders_for(&self, asset_id: &AssetId) -> &[Order] {
        self.orders.get(asset_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.orders.keys()
    }

    /// A copy of this portfolio with the order appended to its asset's list,
    /// inserted after all orders with an earlier-or-equal timestamp.
    pub fn with_order(&self, order: Order) -> Self {
        let mut next = self.clone();
        let list = next.orders.entry(order.asset_id.clone()).or_default();
        let at = list.partition_point(|o| o.timestamp <= order.timestamp);
        list.insert(at, order);
        next
    }

    /// A copy of this portfolio with the matching order filtered out.
    pub fn without_order(&self, order_id: &OrderId) -> Self {
        let mut next = self.clone();
        for list in next.orders.values_mut() {
            list.retain(|o| &o.id != order_id);
        }
        next.orders.retain(|_, list| !list.is_empty());
        next
    }

    /// Signed sum of all cash transactions.
    pub fn cash_balance(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// The top-level aggregate: portfolios keyed by unique name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioLibrary {
    pub portfolios: BTreeMap<String, Portfolio>,
}

impl PortfolioLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Portfolio> {
        self.portfolios.get(name)
    }

    pub fn insert(&mut self, portfolio: Portfolio) {
        self.portfolios.insert(portfolio.name.clone(), portfolio);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.portfolios.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portfolio> {
        self.portfolios.values()
    }
}
