//! Alert feed client and the "check now" scan.

use std::path::PathBuf;

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// One active alert inside a region record. The feed carries extra fields
/// (timestamps, last update); only the type label is rendered to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAlert {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Per-region record of the alert feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRegion {
    #[serde(rename = "regionId")]
    pub region_id: String,
    #[serde(rename = "activeAlerts", default)]
    pub active_alerts: Vec<ActiveAlert>,
}

/// Result of checking the feed for a user's region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertStatus {
    /// The user has no stored region preference.
    NoRegion,
    /// The region record is absent or its alert list is empty.
    Quiet,
    /// Active alert type labels, in feed order.
    Active(Vec<String>),
}

/// Client for the alert feed endpoint.
pub struct AlertsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    snapshot_path: PathBuf,
}

impl AlertsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, snapshot_path: impl Into<PathBuf>) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
            snapshot_path: snapshot_path.into(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(
            config::api::ALERT_API_BASE.clone(),
            config::ALERT_API_TOKEN.clone(),
            config::ALERTS_SNAPSHOT_PATH.as_str(),
        )
    }

    /// Fetches the current feed and overwrites the raw-response snapshot.
    pub async fn fetch(&self) -> AppResult<Vec<AlertRegion>> {
        let url = format!("{}/alerts", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        // Keep the raw body on disk for audit/replay before typing it.
        let raw = response.text().await?;
        fs::write(&self.snapshot_path, &raw)?;

        let feed: Vec<AlertRegion> = serde_json::from_str(&raw)?;
        Ok(feed)
    }
}

/// Scans the feed for a region record with the given id (string comparison,
/// as the feed and the stored preference both use string ids).
pub fn scan(feed: &[AlertRegion], region_id: &str) -> AlertStatus {
    match feed.iter().find(|r| r.region_id == region_id) {
        Some(record) if !record.active_alerts.is_empty() => {
            AlertStatus::Active(record.active_alerts.iter().map(|a| a.kind.clone()).collect())
        }
        _ => AlertStatus::Quiet,
    }
}
