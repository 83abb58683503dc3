//! Verification rule evaluator: pure functions over an already-fetched
//! market pair. These never fail; missing provider fields degrade to
//! conservative defaults.

use crate::dexscreener::Pair;
use crate::models::{DeveloperProfile, PlagiarismReport, Reputation, WebPresence};

const VERIFIED_MIN_LIQUIDITY: f64 = 50_000.0;
const VERIFIED_MIN_AGE_DAYS: f64 = 30.0;
const SUSPICIOUS_MAX_LIQUIDITY: f64 = 5_000.0;
const SUSPICIOUS_MAX_AGE_DAYS: f64 = 3.0;

/// Existence checks over the provider-supplied website and social arrays.
/// URLs are not validated for reachability.
pub fn web_presence(pair: &Pair) -> WebPresence {
    let website_url = pair.info.websites.iter().find_map(|w| w.url.clone());
    let social_url = |platform: &str| {
        pair.info
            .socials
            .iter()
            .find(|s| s.social_type.as_deref() == Some(platform))
            .and_then(|s| s.url.clone())
    };

    let twitter_url = social_url("twitter");
    let telegram_url = social_url("telegram");
    let discord_url = social_url("discord");

    WebPresence {
        website: website_url.is_some(),
        twitter: twitter_url.is_some(),
        telegram: telegram_url.is_some(),
        discord: discord_url.is_some(),
        website_url,
        twitter_url,
        telegram_url,
        discord_url,
    }
}

/// Tiering rule, evaluated in precedence order: verified, known,
/// suspicious, unknown.
pub fn developer_reputation(pair: &Pair, now_ms: i64) -> DeveloperProfile {
    let has_website = !pair.info.websites.is_empty();
    let has_socials = !pair.info.socials.is_empty();
    let liquidity = pair.liquidity.usd;
    let age_days = pair.age_days(now_ms);

    let reputation = if has_website
        && has_socials
        && liquidity > VERIFIED_MIN_LIQUIDITY
        && age_days > VERIFIED_MIN_AGE_DAYS
    {
        Reputation::Verified
    } else if has_website || has_socials {
        Reputation::Known
    } else if liquidity < SUSPICIOUS_MAX_LIQUIDITY && age_days < SUSPICIOUS_MAX_AGE_DAYS {
        Reputation::Suspicious
    } else {
        Reputation::Unknown
    };

    DeveloperProfile {
        identified: has_website || has_socials,
        reputation,
        previous_projects: 0,
        rug_pull_history: false,
    }
}

/// Source-similarity analysis is not built yet; a real implementation
/// needs on-chain bytecode comparison. The explicit variant keeps the
/// stub from rendering as a completed check.
pub fn plagiarism_check(_address: &str, _symbol: &str) -> PlagiarismReport {
    PlagiarismReport::NotImplemented
}
