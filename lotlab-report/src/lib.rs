//! LotLab Report — snapshot loading, report building, artifact export.
//!
//! This crate builds on `lotlab-core` to provide:
//! - JSON snapshot loaders for the portfolio and asset libraries
//! - Content-addressed portfolio snapshot hashing
//! - Per-asset report rows and portfolio totals (computed in parallel)
//! - JSON/CSV/Markdown artifact export with schema versioning
//! - TOML run configuration

pub mod config;
pub mod export;
pub mod loader;
pub mod report;
pub mod snapshot;

pub use config::{ConfigError, ReportConfig};
pub use export::{
    export_closed_positions_csv, export_json, export_series_csv, generate_markdown, import_json,
    load_artifacts, save_artifacts,
};
pub use loader::{load_asset_library, load_portfolio_library, LoadError};
pub use report::{build_report, AssetReport, PortfolioReport, SCHEMA_VERSION};
pub use snapshot::snapshot_hash;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<AssetReport>();
        assert_sync::<AssetReport>();
        assert_send::<PortfolioReport>();
        assert_sync::<PortfolioReport>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<ReportConfig>();
        assert_sync::<ReportConfig>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
    }
}
