//! Routewatch Core Library
//!
//! This crate provides the core functionality for Routewatch agents:
//! - Controller API client (login, running config, inventory, adjacency)
//! - Status report aggregation (per-asset fan-out with failure isolation)
//! - Rendering (fixed-width tables, persisted config/stats files)
//! - Endpoint configuration (environment, config file, defaults)
//!
//! # Example
//!
//! ```no_run
//! use routewatch_core::auth::{CredentialSource, EnvCredentialSource};
//! use routewatch_core::controller::ControllerClient;
//! use routewatch_core::report;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ControllerClient::new("https://192.168.0.1", true)?;
//!
//!     // Authenticate with credentials from the environment
//!     let creds = EnvCredentialSource.credentials()?;
//!     let session = client.login(&creds).await?;
//!
//!     // Build the full status report
//!     let report = report::build_report(&client, &session).await?;
//!     println!("{}", routewatch_core::render::render_text(&report));
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod report;

// Re-export commonly used types
pub use auth::{CredentialSource, Credentials, EnvCredentialSource, Session};
pub use config::{ConfigSource, ControllerEndpointConfig};
pub use controller::ControllerClient;
pub use error::{Error, Result};
pub use report::{
    AdjacencyOutcome, AdjacencyRecord, AdjacencyRow, Asset, LinkStatus, Report, TimeInStatus,
};
