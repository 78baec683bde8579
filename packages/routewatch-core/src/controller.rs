//! HTTP client for the controller's management API.
//!
//! One client per run. All authenticated requests carry the session's
//! bearer token. Response classification follows the controller's
//! conventions: fatal errors carry the raw response body, and an adjacency
//! failure whose body contains the controller's "did not respond" marker is
//! a legitimate operational state, not an error.

use crate::auth::{Credentials, Session};
use crate::config::normalize_base_url;
use crate::error::{Error, Result};
use crate::report::{AdjacencyOutcome, AdjacencyRecord, Asset};
use serde::Deserialize;

/// Marker text the controller embeds in an adjacency failure body when the
/// target router ignored every connection attempt.
const UNREACHABLE_MARKER: &str = "Target router did not respond to any connection attempts";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Clone)]
pub struct ControllerClient {
    base_url: String,
    http: reqwest::Client,
}

impl ControllerClient {
    /// Build a client for the given base URL.
    ///
    /// `verify_tls = false` disables certificate validation for controllers
    /// with self-signed certificates; validation is on by default.
    pub fn new(base_url: &str, verify_tls: bool) -> Result<Self> {
        if !verify_tls {
            tracing::warn!("TLS certificate validation is disabled");
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Authenticate and obtain a session token.
    ///
    /// Fatal on any non-success response; the controller's raw body is
    /// surfaced in the error. No retry.
    pub async fn login(&self, creds: &Credentials) -> Result<Session> {
        let resp = self
            .http
            .post(self.url("api/v1/login"))
            .json(creds)
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication { body });
        }

        let login: LoginResponse = resp.json().await?;
        tracing::debug!("Authenticated to controller");
        Ok(Session::new(login.token))
    }

    /// Fetch the running configuration as an opaque JSON document.
    pub async fn running_config(&self, session: &Session) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(self.url("api/v1/config/running"))
            .bearer_auth(session.token())
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Config { body });
        }

        Ok(resp.json().await?)
    }

    /// Fetch the full asset inventory in the controller's order.
    ///
    /// Sparse records are tolerated: missing fields deserialize to `None`
    /// (rendered as "N/A") rather than failing the whole fetch.
    pub async fn assets(&self, session: &Session) -> Result<Vec<Asset>> {
        let resp = self
            .http
            .get(self.url("api/v1/asset?verbose=false"))
            .bearer_auth(session.token())
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Inventory { body });
        }

        Ok(resp.json().await?)
    }

    /// Fetch adjacency records for one (router, node) pair.
    ///
    /// - success → `Records` (an empty list is valid: no links);
    /// - failure body containing the controller's unreachable marker →
    ///   `Unreachable`;
    /// - any other failure → `Error::Adjacency`, which the aggregator
    ///   contains so one misbehaving router never aborts the run.
    pub async fn adjacency(
        &self,
        session: &Session,
        router: &str,
        node: &str,
    ) -> Result<AdjacencyOutcome> {
        let resp = self
            .http
            .get(self.url(&format!("api/v1/router/{router}/node/{node}/adjacency")))
            .bearer_auth(session.token())
            .send()
            .await?;

        if resp.status().is_success() {
            let records: Vec<AdjacencyRecord> = resp.json().await?;
            return Ok(AdjacencyOutcome::Records(records));
        }

        let body = resp.text().await.unwrap_or_default();
        if body.contains(UNREACHABLE_MARKER) {
            tracing::debug!(router, node, "Router unreachable during adjacency poll");
            return Ok(AdjacencyOutcome::Unreachable);
        }

        Err(Error::Adjacency {
            router: router.to_string(),
            node: node.to_string(),
            body,
        })
    }
}
