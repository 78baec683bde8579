//! Report data model and aggregation.
//!
//! The aggregation pipeline is strictly sequential: one inventory snapshot,
//! then one adjacency request per asset in inventory order. Per-asset
//! failures are contained inside the fan-out loop so a single unreachable
//! or misbehaving router degrades only its own rows.

mod duration;

pub use duration::TimeInStatus;

use crate::auth::Session;
use crate::controller::ControllerClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel rendered for fields the controller did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// One (router, node) pair from the controller's inventory.
///
/// Records can be sparse; missing fields deserialize to `None` and render
/// as [`NOT_AVAILABLE`]. The raw duration integer is preserved unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub router_name: Option<String>,
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_duration_seconds: u64,
}

impl Asset {
    /// The (router, node) key used for adjacency fan-out, or `None` if
    /// either name is missing or empty. Assets without a key are skipped
    /// from fan-out but still appear in the asset table.
    pub fn fan_out_key(&self) -> Option<(&str, &str)> {
        match (self.router_name.as_deref(), self.node_name.as_deref()) {
            (Some(router), Some(node)) if !router.is_empty() && !node.is_empty() => {
                Some((router, node))
            }
            _ => None,
        }
    }

    pub fn time_in_status(&self) -> TimeInStatus {
        TimeInStatus::from_secs(self.status_duration_seconds)
    }
}

/// One adjacency (link) record reported for an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyRecord {
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub device_interface: Option<String>,
    #[serde(default)]
    pub network_interface: Option<String>,
    #[serde(default)]
    pub jitter: Option<f64>,
    #[serde(default)]
    pub link_latency: Option<f64>,
    #[serde(default)]
    pub packet_loss: Option<f64>,
}

/// Result of polling one asset's adjacency endpoint.
///
/// `Unreachable` is a legitimate operational state (the router ignored
/// every connection attempt), distinct from an empty record list.
#[derive(Debug, Clone)]
pub enum AdjacencyOutcome {
    Records(Vec<AdjacencyRecord>),
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    Up,
    Down,
}

impl LinkStatus {
    /// Up iff all three telemetry fields are present. This is a presence
    /// check, not a threshold check: the numeric values are ignored.
    pub fn derive(record: &AdjacencyRecord) -> Self {
        if record.jitter.is_some()
            && record.link_latency.is_some()
            && record.packet_loss.is_some()
        {
            LinkStatus::Up
        } else {
            LinkStatus::Down
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Up => write!(f, "Up"),
            LinkStatus::Down => write!(f, "Down"),
        }
    }
}

/// One flattened row of the adjacency table.
#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyRow {
    pub router: String,
    pub node: String,
    pub status: LinkStatus,
    pub ip_address: String,
    pub device_interface: String,
    pub network_interface: String,
}

impl AdjacencyRow {
    /// Synthetic row for an unreachable router: Down, all link fields N/A.
    fn unreachable(router: &str, node: &str) -> Self {
        Self {
            router: router.to_string(),
            node: node.to_string(),
            status: LinkStatus::Down,
            ip_address: NOT_AVAILABLE.to_string(),
            device_interface: NOT_AVAILABLE.to_string(),
            network_interface: NOT_AVAILABLE.to_string(),
        }
    }

    fn from_record(router: &str, node: &str, record: &AdjacencyRecord) -> Self {
        Self {
            router: router.to_string(),
            node: node.to_string(),
            status: LinkStatus::derive(record),
            ip_address: record
                .ip_address
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            device_interface: record
                .device_interface
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            network_interface: record
                .network_interface
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// The aggregated report for one run. Built once, never mutated after.
#[derive(Debug, Serialize)]
pub struct Report {
    pub running_config: serde_json::Value,
    pub assets: Vec<Asset>,
    pub adjacency_rows: Vec<AdjacencyRow>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl Report {
    pub fn new(
        running_config: serde_json::Value,
        assets: Vec<Asset>,
        adjacency_rows: Vec<AdjacencyRow>,
    ) -> Self {
        Self {
            running_config,
            assets,
            adjacency_rows,
            generated_at: chrono::Utc::now(),
        }
    }
}

/// Poll adjacency for every asset with a usable (router, node) key,
/// flattening the outcomes into table rows.
///
/// Strictly sequential, in inventory order; within an asset the
/// controller's record order is preserved. A per-asset fetch failure is
/// logged and contributes no rows; the loop always runs to completion.
pub async fn fan_out_adjacency(
    client: &ControllerClient,
    session: &Session,
    assets: &[Asset],
) -> Vec<AdjacencyRow> {
    let mut rows = Vec::new();
    for asset in assets {
        let Some((router, node)) = asset.fan_out_key() else {
            continue;
        };
        match client.adjacency(session, router, node).await {
            Ok(AdjacencyOutcome::Unreachable) => {
                rows.push(AdjacencyRow::unreachable(router, node));
            }
            Ok(AdjacencyOutcome::Records(records)) => {
                for record in &records {
                    rows.push(AdjacencyRow::from_record(router, node, record));
                }
            }
            Err(e) => {
                tracing::warn!("{e}");
            }
        }
    }
    rows
}

/// Run the full aggregation pipeline: running config, inventory snapshot,
/// then sequential adjacency fan-out over that snapshot.
///
/// Config and inventory failures are fatal; adjacency failures are
/// contained per asset inside [`fan_out_adjacency`].
pub async fn build_report(client: &ControllerClient, session: &Session) -> Result<Report> {
    let running_config = client.running_config(session).await?;
    let assets = client.assets(session).await?;
    tracing::info!("Fetched {} assets from inventory", assets.len());

    let adjacency_rows = fan_out_adjacency(client, session, &assets).await;
    Ok(Report::new(running_config, assets, adjacency_rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(jitter: Option<f64>, latency: Option<f64>, loss: Option<f64>) -> AdjacencyRecord {
        AdjacencyRecord {
            ip_address: Some("10.0.0.2".to_string()),
            device_interface: Some("ge-0-0".to_string()),
            network_interface: Some("wan0".to_string()),
            jitter,
            link_latency: latency,
            packet_loss: loss,
        }
    }

    #[test]
    fn test_derive_status_all_present_is_up() {
        assert_eq!(
            LinkStatus::derive(&record(Some(1.0), Some(5.0), Some(0.0))),
            LinkStatus::Up
        );
        // Values are irrelevant; only presence matters
        assert_eq!(
            LinkStatus::derive(&record(Some(9999.0), Some(9999.0), Some(100.0))),
            LinkStatus::Up
        );
    }

    #[test]
    fn test_derive_status_any_absent_is_down() {
        assert_eq!(
            LinkStatus::derive(&record(None, Some(5.0), Some(0.0))),
            LinkStatus::Down
        );
        assert_eq!(
            LinkStatus::derive(&record(Some(1.0), None, Some(0.0))),
            LinkStatus::Down
        );
        assert_eq!(
            LinkStatus::derive(&record(Some(1.0), Some(5.0), None)),
            LinkStatus::Down
        );
        assert_eq!(
            LinkStatus::derive(&record(None, None, None)),
            LinkStatus::Down
        );
    }

    #[test]
    fn test_fan_out_key_requires_both_names() {
        let asset = |r: Option<&str>, n: Option<&str>| Asset {
            router_name: r.map(String::from),
            node_name: n.map(String::from),
            status: None,
            status_duration_seconds: 0,
        };

        assert_eq!(asset(Some("R1"), Some("N1")).fan_out_key(), Some(("R1", "N1")));
        assert_eq!(asset(Some(""), Some("N1")).fan_out_key(), None);
        assert_eq!(asset(Some("R1"), Some("")).fan_out_key(), None);
        assert_eq!(asset(None, Some("N1")).fan_out_key(), None);
        assert_eq!(asset(Some("R1"), None).fan_out_key(), None);
    }

    #[test]
    fn test_unreachable_row_shape() {
        let row = AdjacencyRow::unreachable("R2", "N2");
        assert_eq!(row.status, LinkStatus::Down);
        assert_eq!(row.ip_address, NOT_AVAILABLE);
        assert_eq!(row.device_interface, NOT_AVAILABLE);
        assert_eq!(row.network_interface, NOT_AVAILABLE);
    }

    #[test]
    fn test_row_from_record_fills_missing_fields() {
        let mut rec = record(Some(1.0), Some(5.0), Some(0.0));
        rec.ip_address = None;
        let row = AdjacencyRow::from_record("R1", "N1", &rec);
        assert_eq!(row.status, LinkStatus::Up);
        assert_eq!(row.ip_address, NOT_AVAILABLE);
        assert_eq!(row.device_interface, "ge-0-0");
    }

    #[test]
    fn test_asset_time_in_status_preserves_raw_duration() {
        let asset = Asset {
            router_name: Some("R1".to_string()),
            node_name: Some("N1".to_string()),
            status: Some("Up".to_string()),
            status_duration_seconds: 90_000,
        };
        assert_eq!(asset.status_duration_seconds, 90_000);
        assert_eq!(asset.time_in_status().to_string(), "1d 1h 0m");
    }
}
