//! Region Tree Cache
//!
//! Fetches the geographic hierarchy from the alert API and persists it as a
//! JSON snapshot. The selection wizard always matches user input against the
//! snapshot (`load`), so a process restart mid-dialogue doesn't need a
//! network round-trip; `refresh` runs only on flow entry and reset.

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// One node of the geographic hierarchy.
///
/// The upstream field `regionChildIds` carries nested child *objects*, not a
/// list of ids, despite its name. The serde renames keep the wire shape
/// byte-compatible with what the API returns and what the snapshot stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    #[serde(rename = "regionId")]
    pub region_id: String,
    #[serde(rename = "regionName")]
    pub region_name: String,
    #[serde(rename = "regionChildIds", default)]
    pub children: Vec<RegionNode>,
}

impl RegionNode {
    /// A node with no children is the only kind a user may be bound to.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The full tree as served by `GET /regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTree {
    pub states: Vec<RegionNode>,
}

/// Client for the region endpoint of the alert API.
pub struct RegionsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    snapshot_path: PathBuf,
}

impl RegionsClient {
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
            config::REGIONS_SNAPSHOT_PATH.as_str(),
        )
    }

    /// Fetches the tree from the API and overwrites the local snapshot.
    ///
    /// Non-success HTTP status and transport errors surface as
    /// [`AppError::HttpStatus`] / [`AppError::Http`]; the previous snapshot
    /// stays untouched in that case.
    pub async fn refresh(&self) -> AppResult<RegionTree> {
        let url = format!("{}/regions", self.base_url);
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

        let tree: RegionTree = response.json().await?;
        persist_snapshot(&self.snapshot_path, &tree)?;
        log::info!(
            "Refreshed region tree: {} top-level regions, snapshot at {}",
            tree.states.len(),
            self.snapshot_path.display()
        );
        Ok(tree)
    }

    /// Reads the last persisted snapshot.
    pub fn load(&self) -> AppResult<RegionTree> {
        load_snapshot(&self.snapshot_path)
    }
}

fn persist_snapshot(path: &Path, tree: &RegionTree) -> AppResult<()> {
    let json = serde_json::to_string_pretty(tree)?;
    fs::write(path, json)?;
    Ok(())
}

fn load_snapshot(path: &Path) -> AppResult<RegionTree> {
    if !path.exists() {
        return Err(AppError::SnapshotMissing);
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| AppError::DataInconsistency(format!("region snapshot unreadable: {}", e)))
}
