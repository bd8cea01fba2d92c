//! Artifact export — JSON, CSV, and Markdown report generation.
//!
//! All persisted artifacts include a `schema_version` field; versions newer
//! than this build understands are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use lotlab_core::domain::ClosedPosition;
use lotlab_core::engine::Series;

use crate::report::{PortfolioReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `PortfolioReport` to pretty JSON.
pub fn export_json(report: &PortfolioReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize PortfolioReport to JSON")
}

/// Deserialize a `PortfolioReport` from JSON, rejecting unknown schema
/// versions.
pub fn import_json(json: &str) -> Result<PortfolioReport> {
    let report: PortfolioReport =
        serde_json::from_str(json).context("failed to deserialize PortfolioReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export closed lots as CSV.
///
/// Columns: pieces, buy_price, buy_date, sell_price, sell_date, order_fee,
/// gain
pub fn export_closed_positions_csv(closed: &[ClosedPosition]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "pieces",
        "buy_price",
        "buy_date",
        "sell_price",
        "sell_date",
        "order_fee",
        "gain",
    ])?;

    for lot in closed {
        wtr.write_record([
            &format!("{:.6}", lot.pieces),
            &format!("{:.6}", lot.buy_price),
            &lot.buy_date.to_rfc3339(),
            &format!("{:.6}", lot.sell_price),
            &lot.sell_date.to_rfc3339(),
            &format!("{:.2}", lot.order_fee),
            &format!("{:.2}", lot.gain()),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export a numeric series as CSV with timestamp (unix millis) and value
/// columns.
pub fn export_series_csv(series: &Series<f64>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["timestamp", "value"])?;
    for point in series {
        wtr.write_record([&point.timestamp.to_string(), &format!("{:.2}", point.value)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a human-readable Markdown summary of a report.
pub fn generate_markdown(report: &PortfolioReport) -> String {
    let mut md = String::with_capacity(1024);

    md.push_str("# Portfolio Report\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Portfolio | {} |\n", report.portfolio));
    md.push_str(&format!("| Snapshot | {} |\n", report.snapshot_hash));
    md.push_str(&format!("| Generated | {} |\n", report.generated_at.to_rfc3339()));
    md.push_str(&format!("| Cash Balance | {:.2} |\n", report.cash_balance));
    md.push('\n');

    md.push_str("## Assets\n\n");
    md.push_str("| Asset | Pieces | Invested | Realized End Value | Fees | Realized Gains |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: |\n");
    for row in &report.rows {
        if row.oversold {
            md.push_str(&format!("| {} | OVERSOLD | — | — | — | — |\n", row.label));
            continue;
        }
        md.push_str(&format!(
            "| {} | {:.4} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            row.label,
            row.pieces_held,
            row.invested_value,
            row.end_value,
            row.order_fees,
            row.realized_gains
        ));
    }
    md.push('\n');

    md.push_str("## Totals\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | ---: |\n");
    md.push_str(&format!("| Invested Value | {:.2} |\n", report.total_invested_value));
    md.push_str(&format!("| Realized End Value | {:.2} |\n", report.total_end_value));
    md.push_str(&format!("| Order Fees | {:.2} |\n", report.total_order_fees));
    md.push_str(&format!("| Realized Gains | {:.2} |\n", report.total_realized_gains));
    md.push('\n');

    md
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one report.
///
/// Creates `{portfolio}_{timestamp}/` under `output_dir` containing:
/// - `report.json` — the full `PortfolioReport`
/// - `report.md` — the Markdown summary
/// - `closed_positions.csv` — closed-lot tape across all assets
/// - `invested_value.csv` — the portfolio's invested-value series, when
///   supplied
///
/// Returns the path to the created directory.
pub fn save_artifacts(
    report: &PortfolioReport,
    closed: &[ClosedPosition],
    invested: Option<&Series<f64>>,
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.portfolio,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(run_dir.join("report.md"), generate_markdown(report))?;
    std::fs::write(
        run_dir.join("closed_positions.csv"),
        export_closed_positions_csv(closed)?,
    )?;
    if let Some(series) = invested {
        std::fs::write(run_dir.join("invested_value.csv"), export_series_csv(series)?)?;
    }

    Ok(run_dir)
}

/// Load a `PortfolioReport` back from an artifact directory.
pub fn load_artifacts(dir: &Path) -> Result<PortfolioReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
