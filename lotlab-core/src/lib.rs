//! LotLab Core — FIFO tax-lot portfolio engine.
//!
//! This crate contains the heart of the portfolio tracker:
//! - Domain types (orders, lots, portfolios, asset library)
//! - Order normalizer (stable chronological sort)
//! - FIFO lot matcher with proportional fee proration
//! - Portfolio aggregator (pieces, invested value, fees, realized gains)
//! - Position history generator (per-order matcher replay)
//! - Series derivers for charting collaborators
//!
//! All operations are pure, synchronous functions over immutable input
//! snapshots; positions are derived, never stored.

pub mod domain;
pub mod engine;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync, so concurrent
    /// callers (e.g. multiple views over the same portfolio snapshot) need
    /// no synchronization.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Order>();
        require_sync::<domain::Order>();
        require_send::<domain::CashTransaction>();
        require_sync::<domain::CashTransaction>();
        require_send::<domain::OpenPosition>();
        require_sync::<domain::OpenPosition>();
        require_send::<domain::ClosedPosition>();
        require_sync::<domain::ClosedPosition>();
        require_send::<domain::Positions>();
        require_sync::<domain::Positions>();
        require_send::<domain::Portfolio>();
        require_sync::<domain::Portfolio>();
        require_send::<domain::PortfolioLibrary>();
        require_sync::<domain::PortfolioLibrary>();
        require_send::<domain::Asset>();
        require_sync::<domain::Asset>();
        require_send::<domain::AssetLibrary>();
        require_sync::<domain::AssetLibrary>();

        // ID types
        require_send::<domain::OrderId>();
        require_sync::<domain::OrderId>();
        require_send::<domain::AssetId>();
        require_sync::<domain::AssetId>();
        require_send::<domain::TransactionId>();
        require_sync::<domain::TransactionId>();

        // Engine types
        require_send::<engine::MatchError>();
        require_sync::<engine::MatchError>();
        require_send::<engine::PositionFilter>();
        require_sync::<engine::PositionFilter>();
        require_send::<engine::PositionHistoryPoint>();
        require_sync::<engine::PositionHistoryPoint>();
        require_send::<engine::SeriesPoint<f64>>();
        require_sync::<engine::SeriesPoint<f64>>();
    }
}
