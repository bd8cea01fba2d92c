//! LotLab CLI — portfolio report, series, and validation commands.
//!
//! Commands:
//! - `report` — build per-asset FIFO reports from portfolio/asset snapshots
//! - `series` — derive a time series for one asset and print it as CSV
//! - `validate` — check every order tape for oversells, including prefixes

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use lotlab_core::domain::{AssetId, ClosedPosition, Portfolio};
use lotlab_core::engine::{
    cumulative_volume_series, invested_value_series, match_orders, position_history, Series,
};
use lotlab_report::{
    build_report, export_series_csv, load_asset_library, load_portfolio_library, save_artifacts,
    PortfolioReport, ReportConfig,
};

#[derive(Parser)]
#[command(name = "lotlab", about = "LotLab CLI — FIFO tax-lot portfolio engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build per-asset reports for one or all portfolios.
    Report {
        /// Path to a TOML config file (overrides the path flags below).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Portfolio library snapshot (JSON).
        #[arg(long, default_value = "portfolios.json")]
        portfolios: PathBuf,

        /// Asset library snapshot (JSON).
        #[arg(long, default_value = "assets.json")]
        assets: PathBuf,

        /// Report only this portfolio. Defaults to all.
        #[arg(long)]
        portfolio: Option<String>,

        /// Output directory for artifact bundles.
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,

        /// Skip writing artifact bundles to disk.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Derive a time series for one asset and print it as CSV.
    Series {
        /// Portfolio library snapshot (JSON).
        #[arg(long, default_value = "portfolios.json")]
        portfolios: PathBuf,

        /// Portfolio name.
        #[arg(long)]
        portfolio: String,

        /// Asset id.
        #[arg(long)]
        asset: String,

        /// Metric: invested_value or cumulative_volume.
        #[arg(long, default_value = "invested_value")]
        metric: String,
    },
    /// Check every order tape for oversells, including chronological prefixes.
    Validate {
        /// Portfolio library snapshot (JSON).
        #[arg(long, default_value = "portfolios.json")]
        portfolios: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            config,
            portfolios,
            assets,
            portfolio,
            output_dir,
            no_save,
        } => run_report(config, portfolios, assets, portfolio, output_dir, no_save),
        Commands::Series {
            portfolios,
            portfolio,
            asset,
            metric,
        } => run_series(&portfolios, &portfolio, &asset, &metric),
        Commands::Validate { portfolios } => run_validate(&portfolios),
    }
}

fn run_report(
    config_path: Option<PathBuf>,
    portfolios: PathBuf,
    assets: PathBuf,
    portfolio_name: Option<String>,
    output_dir: PathBuf,
    no_save: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ReportConfig::from_file(&path)?,
        None => ReportConfig {
            portfolios,
            assets,
            portfolio: None,
            output_dir,
            save_artifacts: !no_save,
        },
    };
    // --portfolio beats the config file's selection
    let portfolio_name = portfolio_name.or_else(|| config.portfolio.clone());

    let portfolio_library = load_portfolio_library(&config.portfolios)?;
    let asset_library = load_asset_library(&config.assets)?;

    let selected: Vec<&Portfolio> = match &portfolio_name {
        Some(name) => match portfolio_library.get(name) {
            Some(p) => vec![p],
            None => bail!(
                "unknown portfolio '{name}'. Valid: {}",
                portfolio_library.names().collect::<Vec<_>>().join(", ")
            ),
        },
        None => portfolio_library.iter().collect(),
    };

    if selected.is_empty() {
        println!("No portfolios in {}", config.portfolios.display());
        return Ok(());
    }

    for portfolio in selected {
        let report = build_report(portfolio, &asset_library);
        print_summary(&report);

        if config.save_artifacts {
            let closed = closed_lots(portfolio);
            let invested = invested_series(portfolio);
            let run_dir =
                save_artifacts(&report, &closed, invested.as_ref(), &config.output_dir)?;
            println!("Artifacts saved to: {}", run_dir.display());
        }
    }

    Ok(())
}

/// Closed lots across all assets, skipping oversold tapes.
fn closed_lots(portfolio: &Portfolio) -> Vec<ClosedPosition> {
    portfolio
        .asset_ids()
        .filter_map(|id| match_orders(portfolio.orders_for(id)).ok())
        .flat_map(|positions| positions.closed)
        .collect()
}

/// Invested-value series for the artifact bundle. Written only when the
/// portfolio holds a single asset; series timestamps across assets don't
/// align, so there is no meaningful merged series to export.
fn invested_series(portfolio: &Portfolio) -> Option<Series<f64>> {
    let mut ids = portfolio.asset_ids();
    let only = ids.next()?;
    if ids.next().is_some() {
        return None;
    }
    let history = position_history(portfolio.orders_for(only))?;
    Some(invested_value_series(&history))
}

fn run_series(portfolios: &Path, portfolio_name: &str, asset: &str, metric: &str) -> Result<()> {
    let library = load_portfolio_library(portfolios)?;
    let Some(portfolio) = library.get(portfolio_name) else {
        bail!(
            "unknown portfolio '{portfolio_name}'. Valid: {}",
            library.names().collect::<Vec<_>>().join(", ")
        );
    };

    let asset_id = AssetId::new(asset);
    let orders = portfolio.orders_for(&asset_id);
    if orders.is_empty() {
        bail!("portfolio '{portfolio_name}' has no orders for asset '{asset}'");
    }

    let series = match metric {
        "invested_value" => {
            let Some(history) = position_history(orders) else {
                bail!("asset '{asset}' oversells at some point in its tape");
            };
            invested_value_series(&history)
        }
        "cumulative_volume" => cumulative_volume_series(orders),
        _ => bail!("unknown metric '{metric}'. Valid: invested_value, cumulative_volume"),
    };

    print!("{}", export_series_csv(&series)?);
    Ok(())
}

fn run_validate(portfolios: &Path) -> Result<()> {
    let library = load_portfolio_library(portfolios)?;
    let mut failures = 0usize;

    for portfolio in library.iter() {
        for asset_id in portfolio.asset_ids() {
            let orders = portfolio.orders_for(asset_id);
            match match_orders(orders) {
                Err(err) => {
                    failures += 1;
                    println!("FAIL  {} / {asset_id}: {err}", portfolio.name);
                }
                Ok(_) => {
                    if position_history(orders).is_none() {
                        failures += 1;
                        println!(
                            "FAIL  {} / {asset_id}: a chronological prefix oversells",
                            portfolio.name
                        );
                    } else {
                        println!("ok    {} / {asset_id}", portfolio.name);
                    }
                }
            }
        }
    }

    if failures > 0 {
        println!();
        println!("{failures} tape(s) failed validation.");
        std::process::exit(1);
    }

    println!();
    println!("All tapes valid.");
    Ok(())
}

fn print_summary(report: &PortfolioReport) {
    println!();
    println!("=== Portfolio Report: {} ===", report.portfolio);
    println!("Snapshot:        {}", &report.snapshot_hash[..16.min(report.snapshot_hash.len())]);
    println!("Generated:       {}", report.generated_at.to_rfc3339());
    println!("Assets:          {}", report.rows.len());
    println!();
    println!(
        "{:<24} {:>10} {:>12} {:>12} {:>8} {:>10}",
        "Asset", "Pieces", "Invested", "End Value", "Fees", "Gains"
    );
    println!("{}", "-".repeat(80));
    for row in &report.rows {
        if row.oversold {
            println!("{:<24} OVERSOLD", row.label);
            continue;
        }
        println!(
            "{:<24} {:>10.4} {:>12.2} {:>12.2} {:>8.2} {:>10.2}",
            row.label,
            row.pieces_held,
            row.invested_value,
            row.end_value,
            row.order_fees,
            row.realized_gains
        );
    }
    println!("{}", "-".repeat(80));
    println!(
        "{:<24} {:>10} {:>12.2} {:>12.2} {:>8.2} {:>10.2}",
        "Total",
        "",
        report.total_invested_value,
        report.total_end_value,
        report.total_order_fees,
        report.total_realized_gains
    );
    println!("Cash balance:    {:.2}", report.cash_balance);
    println!();
}
