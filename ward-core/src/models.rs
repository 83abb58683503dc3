use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single checklist item. Warnings and fails both count as
/// non-pass when the overall score is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    pub url: String,
    pub stars: u64,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubVerification {
    pub found: bool,
    pub repos: Vec<RepoSummary>,
    pub total_repos: u64,
}

impl GithubVerification {
    pub fn not_found() -> Self {
        Self {
            found: false,
            repos: Vec::new(),
            total_repos: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPresence {
    pub website: bool,
    pub twitter: bool,
    pub telegram: bool,
    pub discord: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reputation {
    Unknown,
    Known,
    Verified,
    Suspicious,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperProfile {
    pub identified: bool,
    pub reputation: Reputation,
    /// Extension point: would require a project database lookup.
    pub previous_projects: u32,
    /// Extension point: would require a scam-history database check.
    pub rug_pull_history: bool,
}

impl DeveloperProfile {
    pub fn unknown() -> Self {
        Self {
            identified: false,
            reputation: Reputation::Unknown,
            previous_projects: 0,
            rug_pull_history: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarContract {
    pub address: String,
    pub similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Source-similarity verdict. `NotImplemented` is distinct from `Clean` so
/// a stubbed analysis is never presented as a completed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PlagiarismReport {
    NotImplemented,
    Clean,
    Detected {
        #[serde(rename = "similarContracts")]
        similar_contracts: Vec<SimilarContract>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub github: GithubVerification,
    pub web_presence: WebPresence,
    pub developer: DeveloperProfile,
    pub plagiarism: PlagiarismReport,
}

impl Verification {
    /// Neutral verification used by the degraded-upstream fallback.
    pub fn unavailable() -> Self {
        Self {
            github: GithubVerification::not_found(),
            web_presence: WebPresence::default(),
            developer: DeveloperProfile::unknown(),
            plagiarism: PlagiarismReport::NotImplemented,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub liquidity: f64,
    pub fdv: f64,
    pub volume_24h: f64,
}

impl TokenInfo {
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            symbol: "???".to_string(),
            liquidity: 0.0,
            fdv: 0.0,
            volume_24h: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub contract_address: String,
    pub overall_score: u8,
    pub vulnerabilities: Vec<Check>,
    pub verification: Verification,
    pub scan_time: DateTime<Utc>,
    pub token_info: TokenInfo,
}

/// One wallet holding as reported by the wallet-holdings endpoint. Price and
/// value are additionally perturbed client-side for display; the perturbed
/// copy never leaves the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub balance: f64,
    pub value: f64,
    pub price: f64,
    pub price_change_24h: f64,
    pub risk_score: u8,
    #[serde(default)]
    pub alerts: Vec<String>,
    pub liquidity: f64,
    pub holders: u64,
    pub top_holder_percent: f64,
    pub dev_holding: f64,
    pub suspicious_activity: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub action: SignalAction,
    pub confidence: u8,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward: f64,
    #[serde(rename = "reason")]
    pub reasons: Vec<String>,
    /// Unix milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProposalStatus,
    pub votes_for: u64,
    pub votes_against: u64,
    pub total_votes: u64,
    pub ends_in: String,
    pub proposer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    For,
    Against,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::For => "FOR",
            VoteChoice::Against => "AGAINST",
        }
    }
}

/// Allow-list entry curated by hand; see `verified.rs`.
#[derive(Debug, Clone, Copy)]
pub struct ManuallyVerifiedToken {
    pub address: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub github_url: Option<&'static str>,
    pub verified_date: &'static str,
    pub notes: Option<&'static str>,
    pub category: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plagiarism_reports_compare_across_all_variants() {
        let detected = PlagiarismReport::Detected {
            similar_contracts: vec![SimilarContract {
                address: "CopyMint111".to_string(),
                similarity: 0.92,
                name: Some("Copycat".to_string()),
            }],
        };
        assert_eq!(detected, detected.clone());
        assert_ne!(detected, PlagiarismReport::Clean);
        assert_ne!(PlagiarismReport::NotImplemented, PlagiarismReport::Clean);
    }

    #[test]
    fn test_detected_report_serializes_tagged() {
        let report = PlagiarismReport::Detected {
            similar_contracts: vec![SimilarContract {
                address: "CopyMint111".to_string(),
                similarity: 0.92,
                name: None,
            }],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "detected");
        assert_eq!(value["similarContracts"][0]["similarity"], 0.92);
    }
}
