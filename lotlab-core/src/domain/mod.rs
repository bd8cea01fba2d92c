//! Domain types for LotLab.

pub mod asset;
pub mod ids;
pub mod order;
pub mod portfolio;
pub mod position;

pub use asset::{Asset, AssetLibrary};
pub use ids::{AssetId, OrderId, TransactionId};
pub use order::{CashTransaction, Order};
pub use portfolio::{Portfolio, PortfolioLibrary};
pub use position::{ClosedPosition, OpenPosition, Positions};
