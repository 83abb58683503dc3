use anyhow::{bail, Result};
use serde::Deserialize;

use ward_core::models::{AuditResult, TokenHolding};

/// Client for the ward-api audit endpoint.
pub struct AuditApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuditApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn audit(&self, address: &str) -> Result<AuditResult> {
        let url = format!("{}/api/contract-audit", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("address", address)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("audit request failed");
            bail!("{status}: {message}");
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletHoldingsResponse {
    #[serde(default)]
    pub holdings: Vec<TokenHolding>,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for the wallet-holdings endpoint (an external collaborator).
pub struct HoldingsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HoldingsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn holdings(&self, wallet: &str) -> Result<WalletHoldingsResponse> {
        let url = format!("{}/api/wallet-holdings", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("address", wallet)])
            .send()
            .await?;

        let body: WalletHoldingsResponse = response.json().await?;
        if let Some(error) = &body.error {
            bail!("{error}");
        }
        Ok(body)
    }
}
