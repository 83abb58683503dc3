//! The audit aggregator: one upstream pair lookup, then a concurrent
//! fan-out over the verification branches, merged into the fixed
//! 12-item checklist.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use ward_core::checks;
use ward_core::dexscreener::{DexClient, Pair};
use ward_core::error::ProviderError;
use ward_core::github::GithubClient;
use ward_core::models::{AuditResult, Check, CheckStatus, TokenInfo, Verification};
use ward_core::rules;

#[derive(Clone)]
pub struct AppState {
    pub dex: DexClient,
    pub github: GithubClient,
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub address: Option<String>,
}

pub enum AuditOutcome {
    Complete(Box<AuditResult>),
    TokenNotFound,
}

pub async fn contract_audit_handler(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Response {
    let Some(address) = query.address.filter(|a| !a.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Token address required" })),
        )
            .into_response();
    };

    match run_audit(&state, &address).await {
        Ok(outcome) => outcome_response(outcome),
        Err(err) => {
            tracing::error!(error = %err, %address, "contract audit failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to audit contract" })),
            )
                .into_response()
        }
    }
}

fn outcome_response(outcome: AuditOutcome) -> Response {
    match outcome {
        AuditOutcome::Complete(result) => Json(*result).into_response(),
        AuditOutcome::TokenNotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Token not found" })),
        )
            .into_response(),
    }
}

pub async fn run_audit(state: &AppState, address: &str) -> anyhow::Result<AuditOutcome> {
    let pair = match state.dex.first_pair(address).await {
        Ok(Some(pair)) => pair,
        Ok(None) => return Ok(AuditOutcome::TokenNotFound),
        Err(ProviderError::Degraded(reason)) => {
            tracing::warn!(%reason, "market data degraded, serving fallback audit");
            return Ok(AuditOutcome::Complete(Box::new(fallback_audit(
                address,
                Utc::now(),
            ))));
        }
        Err(err) => return Err(err.into()),
    };

    let now = Utc::now();
    let result = audit_pair(state, address, &pair, now).await;
    Ok(AuditOutcome::Complete(Box::new(result)))
}

/// The four verification lookups are independent failure domains: each
/// resolves to a neutral value on its own failure, so one branch can
/// never abort the others.
async fn audit_pair(
    state: &AppState,
    address: &str,
    pair: &Pair,
    now: DateTime<Utc>,
) -> AuditResult {
    let now_ms = now.timestamp_millis();
    let symbol = pair.base_token.symbol.as_str();
    let name = pair.base_token.name.as_str();

    let (github, web_presence, developer, plagiarism) = tokio::join!(
        state.github.search_repos(symbol, name),
        async { rules::web_presence(pair) },
        async { rules::developer_reputation(pair, now_ms) },
        async { rules::plagiarism_check(address, symbol) },
    );

    let verification = Verification {
        github,
        web_presence,
        developer,
        plagiarism,
    };

    let vulnerabilities = checks::build_checklist(pair, &verification);
    let overall_score = checks::overall_score(&vulnerabilities);

    AuditResult {
        contract_address: address.to_string(),
        overall_score,
        vulnerabilities,
        verification,
        scan_time: now,
        token_info: TokenInfo {
            name: name.to_string(),
            symbol: symbol.to_string(),
            liquidity: pair.liquidity.usd,
            fdv: pair.fdv,
            volume_24h: pair.volume.h24,
        },
    }
}

/// The only defined degradation path: rate-limited or malformed upstream
/// answers get a fixed 200 payload, never an error status.
pub fn fallback_audit(address: &str, now: DateTime<Utc>) -> AuditResult {
    AuditResult {
        contract_address: address.to_string(),
        overall_score: 50,
        vulnerabilities: vec![Check {
            name: "API Unavailable".to_string(),
            status: CheckStatus::Warning,
            description: "Rate limited - please try again in a moment".to_string(),
        }],
        verification: Verification::unavailable(),
        scan_time: now,
        token_info: TokenInfo::unknown(),
    }
}
