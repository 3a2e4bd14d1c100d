//! GitHub commit listing.

use serde::Deserialize;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// How many commits are rendered per repository.
pub const SHOWN_COMMITS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetails {
    pub author: CommitAuthor,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
}

/// Renders the first [`SHOWN_COMMITS`] entries, one line each.
pub fn format_commits(commits: &[CommitEntry]) -> String {
    commits
        .iter()
        .take(SHOWN_COMMITS)
        .map(|c| format!("👤 {}: {}", c.commit.author.name, c.commit.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Client for the commits endpoint.
pub struct CommitsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CommitsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> AppResult<Self> {
        // GitHub rejects requests without a User-Agent.
        let http = reqwest::Client::builder()
            .timeout(config::network::timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(config::api::GITHUB_API_BASE.clone(), config::GITHUB_TOKEN.clone())
    }

    /// Commit history of `owner/repo`, newest first, as GitHub returns it.
    pub async fn recent_commits(&self, owner: &str, repo: &str) -> AppResult<Vec<CommitEntry>> {
        let url = format!("{}/repos/{}/{}/commits", self.base_url, owner, repo);
        let mut request = self.http.get(&url);
        if !self.token.is_empty() {
            request = request.header("Authorization", format!("token {}", self.token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(author: &str, message: &str) -> CommitEntry {
        CommitEntry {
            commit: CommitDetails {
                author: CommitAuthor {
                    name: author.to_string(),
                },
                message: message.to_string(),
            },
        }
    }

    #[test]
    fn test_format_takes_first_five() {
        let commits: Vec<CommitEntry> = (0..8).map(|i| entry("dev", &format!("commit {}", i))).collect();
        let text = format_commits(&commits);
        assert_eq!(text.lines().count(), SHOWN_COMMITS);
        assert!(text.contains("commit 0"));
        assert!(!text.contains("commit 5"));
    }

    #[test]
    fn test_format_line_shape() {
        let text = format_commits(&[entry("Linus", "init")]);
        assert_eq!(text, "👤 Linus: init");
    }

    #[test]
    fn test_parse_api_shape() {
        let commits: Vec<CommitEntry> = serde_json::from_str(
            r#"[{"sha":"abc","commit":{"author":{"name":"Linus","email":"x@y.z"},"message":"init"}}]"#,
        )
        .unwrap();
        assert_eq!(commits[0].commit.author.name, "Linus");
    }
}
