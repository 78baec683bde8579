//! Fixed-width rendering and file persistence for reports.
//!
//! Column widths match the controller's conventional report layout:
//! assets at 20/15/15/20 under a 70-dash rule, adjacency at
//! 20/15/10/50/20/20 under a 130-dash rule.

use crate::report::{AdjacencyRow, Asset, Report, NOT_AVAILABLE};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp fragment used in output file names.
pub fn file_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Render the "Asset Information" section.
pub fn asset_table(assets: &[Asset]) -> String {
    let mut out = String::new();
    out.push_str("Asset Information:\n");
    out.push_str(&format!(
        "{:<20}{:<15}{:<15}{:<20}\n",
        "Router", "Node", "Status", "Time in Status"
    ));
    out.push_str(&"-".repeat(70));
    out.push('\n');
    for asset in assets {
        out.push_str(&format!(
            "{:<20}{:<15}{:<15}{:<20}\n",
            asset.router_name.as_deref().unwrap_or(NOT_AVAILABLE),
            asset.node_name.as_deref().unwrap_or(NOT_AVAILABLE),
            asset.status.as_deref().unwrap_or(NOT_AVAILABLE),
            asset.time_in_status().to_string(),
        ));
    }
    out
}

/// Render the "Adjacency Information" section.
pub fn adjacency_table(rows: &[AdjacencyRow]) -> String {
    let mut out = String::new();
    out.push_str("Adjacency Information:\n");
    out.push_str(&format!(
        "{:<20}{:<15}{:<10}{:<50}{:<20}{:<20}\n",
        "Router", "Node", "Status", "IPAddress", "DeviceInterface", "NetworkInterface"
    ));
    out.push_str(&"-".repeat(130));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<20}{:<15}{:<10}{:<50}{:<20}{:<20}\n",
            row.router,
            row.node,
            row.status.to_string(),
            row.ip_address,
            row.device_interface,
            row.network_interface,
        ));
    }
    out
}

/// Render both sections as one text report.
pub fn render_text(report: &Report) -> String {
    format!(
        "{}\n\n{}",
        asset_table(&report.assets),
        adjacency_table(&report.adjacency_rows)
    )
}

/// Write the running configuration verbatim (pretty-printed JSON) to
/// `routewatch-config-<stamp>.json` in `dir`.
pub fn save_config(config: &serde_json::Value, dir: &Path, stamp: &str) -> Result<PathBuf> {
    let path = dir.join(format!("routewatch-config-{stamp}.json"));
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Configuration saved to {}", path.display());
    Ok(path)
}

/// Write the rendered asset/adjacency report to
/// `routewatch-stats-<stamp>.txt` in `dir`.
pub fn save_stats(report: &Report, dir: &Path, stamp: &str) -> Result<PathBuf> {
    let path = dir.join(format!("routewatch-stats-{stamp}.txt"));
    fs::write(&path, render_text(report))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Asset and adjacency information saved to {}", path.display());
    Ok(path)
}
