//! Error taxonomy for the report pipeline.
//!
//! The fatal variants carry the controller's raw response body verbatim so
//! the operator sees exactly what the controller said. `Adjacency` is the
//! one non-fatal variant: the aggregator logs it for the offending
//! (router, node) pair and continues with the rest of the inventory.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Login rejected by the controller. Fatal; aborts the run.
    #[error("Authentication failed: {body}")]
    Authentication { body: String },

    /// Running-configuration fetch rejected. Fatal.
    #[error("Failed to fetch config: {body}")]
    Config { body: String },

    /// Asset inventory fetch rejected. Fatal.
    #[error("Failed to fetch asset info: {body}")]
    Inventory { body: String },

    /// Adjacency fetch failed for a single (router, node) pair with a
    /// response that is not the controller's "unreachable" marker.
    #[error("Failed to fetch adjacency for router {router}, node {node}: {body}")]
    Adjacency {
        router: String,
        node: String,
        body: String,
    },

    /// Transport-level failure (connect, TLS, malformed response body).
    #[error("Controller request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
