//! Market-data provider client (DexScreener-compatible API).

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};

use crate::error::ProviderError;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Numeric fields in pair payloads arrive either as JSON numbers or as
/// strings ("15000"). Absent and unparseable values degrade to 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(NumOrStr::Num(n)) => Ok(n),
        Some(NumOrStr::Str(s)) => Ok(s.parse().unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(default)]
    pub pairs: Vec<Pair>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pair {
    pub chain_id: String,
    pub base_token: BaseToken,
    #[serde(deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    pub price_change: PriceChange,
    pub liquidity: Liquidity,
    #[serde(deserialize_with = "lenient_f64")]
    pub fdv: f64,
    pub volume: Volume,
    pub txns: TxnWindows,
    pub info: PairInfo,
    /// Pair creation time in unix milliseconds; absent for some venues.
    pub pair_created_at: Option<i64>,
}

impl Pair {
    /// Wall-clock age in days. Missing creation timestamp counts as age 0,
    /// which biases the reputation rules toward suspicious/unknown.
    pub fn age_days(&self, now_ms: i64) -> f64 {
        match self.pair_created_at {
            Some(created) => ((now_ms - created) as f64 / MS_PER_DAY).max(0.0),
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseToken {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceChange {
    #[serde(deserialize_with = "lenient_f64")]
    pub h1: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub h6: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub h24: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    #[serde(deserialize_with = "lenient_f64")]
    pub usd: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(deserialize_with = "lenient_f64")]
    pub h24: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TxnWindows {
    pub h1: TxnCounts,
    pub h24: TxnCounts,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

impl TxnCounts {
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PairInfo {
    pub websites: Vec<WebsiteEntry>,
    pub socials: Vec<SocialEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebsiteEntry {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialEntry {
    #[serde(default, rename = "type")]
    pub social_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DexClient {
    client: reqwest::Client,
    base_url: String,
}

impl DexClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the first trading pair listed for a token address.
    ///
    /// HTTP 429 and non-JSON bodies map to `ProviderError::Degraded`; other
    /// non-success statuses are hard errors. An empty pair list is `None`.
    pub async fn first_pair(&self, address: &str) -> Result<Option<Pair>, ProviderError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, address);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::Degraded("rate limited".to_string()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Err(ProviderError::Degraded("non-JSON response body".to_string()));
        }

        let response = response.error_for_status()?;
        let body: TokenPairsResponse = response.json().await?;
        Ok(body.pairs.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_with_string_numerics() {
        let raw = r#"{
            "pairs": [{
                "chainId": "solana",
                "baseToken": { "name": "Ward AI", "symbol": "WARD" },
                "priceUsd": "0.0042",
                "priceChange": { "h1": "1.5", "h6": 3.0, "h24": "-2.25" },
                "liquidity": { "usd": "15000" },
                "fdv": "300000",
                "volume": { "h24": 12500.5 },
                "txns": { "h1": { "buys": 4, "sells": 2 }, "h24": { "buys": 40, "sells": 25 } },
                "info": {
                    "websites": [{ "url": "https://ward.ai" }],
                    "socials": [{ "type": "twitter", "url": "https://x.com/wardai" }]
                },
                "pairCreatedAt": 1700000000000
            }]
        }"#;

        let parsed: TokenPairsResponse = serde_json::from_str(raw).unwrap();
        let pair = &parsed.pairs[0];

        assert_eq!(pair.base_token.symbol, "WARD");
        assert_eq!(pair.liquidity.usd, 15_000.0);
        assert_eq!(pair.fdv, 300_000.0);
        assert_eq!(pair.price_change.h24, -2.25);
        assert_eq!(pair.txns.h24.total(), 65);
        assert_eq!(pair.info.websites.len(), 1);
    }

    #[test]
    fn test_parse_sparse_pair_degrades_to_defaults() {
        let raw = r#"{ "pairs": [{ "chainId": "solana" }] }"#;
        let parsed: TokenPairsResponse = serde_json::from_str(raw).unwrap();
        let pair = &parsed.pairs[0];

        assert_eq!(pair.liquidity.usd, 0.0);
        assert_eq!(pair.fdv, 0.0);
        assert_eq!(pair.txns.h24.total(), 0);
        assert!(pair.pair_created_at.is_none());
        assert_eq!(pair.age_days(1_700_000_000_000), 0.0);
    }

    #[test]
    fn test_empty_pairs_list() {
        let parsed: TokenPairsResponse = serde_json::from_str(r#"{ "pairs": [] }"#).unwrap();
        assert!(parsed.pairs.is_empty());
    }

    #[test]
    fn test_age_days() {
        let pair = Pair {
            pair_created_at: Some(0),
            ..Pair::default()
        };
        let forty_days_ms = 40 * 86_400_000;
        assert_eq!(pair.age_days(forty_days_ms), 40.0);
    }
}
