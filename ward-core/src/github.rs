//! Code-search provider client (GitHub repository search).

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

use crate::error::ProviderError;
use crate::models::{GithubVerification, RepoSummary};

const REPO_LIMIT: usize = 5;
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const AGENT_HEADER: &str = "ward-ai-market-guard";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub updated_at: String,
}

fn to_verification(body: SearchResponse) -> GithubVerification {
    let repos: Vec<RepoSummary> = body
        .items
        .into_iter()
        .take(REPO_LIMIT)
        .map(|item| RepoSummary {
            name: item.name,
            url: item.html_url,
            stars: item.stargazers_count,
            last_updated: item.updated_at,
        })
        .collect();

    GithubVerification {
        found: !repos.is_empty(),
        total_repos: body.total_count,
        repos,
    }
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search repositories matching `"<symbol> <name> solana token"`,
    /// sorted by stars, at most five results. This lookup is one branch of
    /// the audit fan-out and must never abort the others: every failure
    /// path, including non-200 statuses, collapses to "not found".
    pub async fn search_repos(&self, symbol: &str, name: &str) -> GithubVerification {
        match self.try_search(symbol, name).await {
            Ok(verification) => verification,
            Err(err) => {
                tracing::warn!(error = %err, "github search failed");
                GithubVerification::not_found()
            }
        }
    }

    async fn try_search(
        &self,
        symbol: &str,
        name: &str,
    ) -> Result<GithubVerification, ProviderError> {
        let query = format!("{} {} solana token", symbol, name);
        let response = self
            .client
            .get(format!("{}/search/repositories", self.base_url))
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", "5"),
            ])
            .header(ACCEPT, ACCEPT_HEADER)
            .header(USER_AGENT, AGENT_HEADER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(GithubVerification::not_found());
        }

        let body: SearchResponse = response.json().await?;
        Ok(to_verification(body))
    }
}
