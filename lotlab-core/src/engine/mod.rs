//! Lot-matching engine — normalization, FIFO matching, aggregation,
//! history replay, and series derivation.
//!
//! Data flow: raw orders → normalizer → matcher → {aggregator, history
//! generator} → series derivers. Everything here is pure and synchronous
//! over immutable snapshots; callers own consistency across composed
//! computations.

pub mod aggregate;
pub mod history;
pub mod matcher;
pub mod normalize;
pub mod series;

pub use aggregate::{
    end_value_of, initial_value_of, order_fees_of, pieces_of, portfolio_end_value,
    portfolio_initial_value, portfolio_order_fees, portfolio_pieces, portfolio_realized_gains,
    realized_gains_of, PositionFilter,
};
pub use history::{position_history, PositionHistoryPoint};
pub use matcher::{match_orders, MatchError};
pub use normalize::sort_chronologically;
pub use series::{
    cumulative_volume_series, invested_value_series, metric_series, Series, SeriesPoint,
};
