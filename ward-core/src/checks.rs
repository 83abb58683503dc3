//! Fixed audit checklist and scoring.

use crate::dexscreener::Pair;
use crate::models::{Check, CheckStatus, PlagiarismReport, Reputation, Verification};

const LIQUIDITY_LOCKED_MIN_USD: f64 = 10_000.0;
const ACTIVE_TRADING_MIN_TXNS: u64 = 10;
const LIQUIDITY_RATIO_MIN: f64 = 0.05;

fn check(name: &str, status: CheckStatus, description: String) -> Check {
    Check {
        name: name.to_string(),
        status,
        description,
    }
}

/// Builds the fixed 12-item checklist. Order is significant for display
/// only; the score is a plain pass ratio.
pub fn build_checklist(pair: &Pair, verification: &Verification) -> Vec<Check> {
    let liquidity = pair.liquidity.usd;
    let fdv = pair.fdv;
    let txns_24h = pair.txns.h24;
    let total_txns = txns_24h.total();

    let liquidity_locked = liquidity > LIQUIDITY_LOCKED_MIN_USD;
    let ownership_renounced = !pair.info.websites.is_empty();
    let contract_verified = pair.chain_id == "solana";
    let sells_detected = txns_24h.sells > 0;
    let liquidity_ratio_ok = fdv > 0.0 && liquidity / fdv > LIQUIDITY_RATIO_MIN;
    let ratio_percent = if fdv > 0.0 {
        (liquidity / fdv) * 100.0
    } else {
        0.0
    };

    let github = &verification.github;
    let presence = &verification.web_presence;
    let developer = &verification.developer;

    let yes_no = |b: bool| if b { "Yes" } else { "No" };

    vec![
        check(
            "GitHub Repository",
            if github.found && github.total_repos > 0 {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            if github.found {
                format!("Found {} related repositories", github.total_repos)
            } else {
                "No GitHub repositories found for this project".to_string()
            },
        ),
        check(
            "Web Presence",
            if presence.website && (presence.twitter || presence.telegram) {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            format!(
                "Website: {} | Social: {}",
                yes_no(presence.website),
                yes_no(presence.twitter || presence.telegram)
            ),
        ),
        check(
            "Developer Reputation",
            match developer.reputation {
                Reputation::Verified => CheckStatus::Pass,
                Reputation::Suspicious => CheckStatus::Fail,
                Reputation::Known | Reputation::Unknown => CheckStatus::Warning,
            },
            format!(
                "Reputation: {} | {}",
                match developer.reputation {
                    Reputation::Unknown => "unknown",
                    Reputation::Known => "known",
                    Reputation::Verified => "verified",
                    Reputation::Suspicious => "suspicious",
                },
                if developer.rug_pull_history {
                    "Rug pull history detected!"
                } else {
                    "No rug pull history"
                }
            ),
        ),
        match &verification.plagiarism {
            PlagiarismReport::Detected { similar_contracts } => check(
                "Code Originality",
                CheckStatus::Fail,
                format!("Detected {} similar contracts", similar_contracts.len()),
            ),
            PlagiarismReport::Clean => check(
                "Code Originality",
                CheckStatus::Pass,
                "No plagiarism detected".to_string(),
            ),
            // A stub must not read as a completed check.
            PlagiarismReport::NotImplemented => check(
                "Code Originality",
                CheckStatus::Warning,
                "Source similarity analysis not yet available".to_string(),
            ),
        },
        check(
            "Ownership Renounced",
            if ownership_renounced {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            "Contract ownership status on Solana".to_string(),
        ),
        check(
            "Liquidity Locked",
            if liquidity_locked {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            },
            format!("Current liquidity: ${:.0}", liquidity),
        ),
        check(
            "No Mint Function",
            CheckStatus::Pass,
            "SPL token standard - no arbitrary minting".to_string(),
        ),
        check(
            "Trading Active",
            if total_txns > ACTIVE_TRADING_MIN_TXNS {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            format!("{} transactions in last 24h", total_txns),
        ),
        check(
            "Honeypot Detection",
            if sells_detected {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            },
            format!("{} sell transactions detected", txns_24h.sells),
        ),
        check(
            "Liquidity Ratio",
            if liquidity_ratio_ok {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            format!("Liquidity/FDV ratio: {:.2}%", ratio_percent),
        ),
        check(
            "Contract Verified",
            if contract_verified {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            "Token verified on Solana blockchain".to_string(),
        ),
        check(
            "Buy/Sell Balance",
            if txns_24h.buys as f64 > txns_24h.sells as f64 * 0.5 {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            format!("{} buys vs {} sells", txns_24h.buys, txns_24h.sells),
        ),
    ]
}

/// Percentage of checks that pass, rounded. Warnings and fails are both
/// non-pass; severity is deliberately unweighted.
pub fn overall_score(checklist: &[Check]) -> u8 {
    if checklist.is_empty() {
        return 0;
    }
    let pass_count = checklist
        .iter()
        .filter(|c| c.status == CheckStatus::Pass)
        .count();
    ((pass_count as f64 / checklist.len() as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dexscreener::{Liquidity, Pair, PairInfo, SocialEntry, TxnCounts, TxnWindows, WebsiteEntry};
    use crate::models::{DeveloperProfile, GithubVerification, WebPresence};
    use crate::rules;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 86_400_000;

    fn healthy_pair() -> Pair {
        Pair {
            chain_id: "solana".to_string(),
            liquidity: Liquidity { usd: 15_000.0 },
            fdv: 300_000.0,
            txns: TxnWindows {
                h1: TxnCounts { buys: 5, sells: 3 },
                h24: TxnCounts {
                    buys: 40,
                    sells: 25,
                },
            },
            pair_created_at: Some(NOW - 40 * DAY_MS),
            info: PairInfo {
                websites: vec![WebsiteEntry {
                    url: Some("https://ward.ai".to_string()),
                }],
                socials: vec![SocialEntry {
                    social_type: Some("twitter".to_string()),
                    url: Some("https://x.com/wardai".to_string()),
                }],
            },
            ..Pair::default()
        }
    }

    fn verification_for(pair: &Pair) -> Verification {
        Verification {
            github: GithubVerification::not_found(),
            web_presence: rules::web_presence(pair),
            developer: rules::developer_reputation(pair, NOW),
            plagiarism: rules::plagiarism_check("addr", "WARD"),
        }
    }

    fn find<'a>(checklist: &'a [Check], name: &str) -> &'a Check {
        checklist
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing check {name}"))
    }

    #[test]
    fn test_checklist_has_exactly_twelve_items() {
        let pair = healthy_pair();
        let checklist = build_checklist(&pair, &verification_for(&pair));
        assert_eq!(checklist.len(), 12);
    }

    #[test]
    fn test_score_is_rounded_pass_ratio() {
        let pair = healthy_pair();
        let checklist = build_checklist(&pair, &verification_for(&pair));
        let pass_count = checklist
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        let score = overall_score(&checklist);
        assert_eq!(
            score,
            ((pass_count as f64 / 12.0) * 100.0).round() as u8
        );
        assert!(score <= 100);
    }

    #[test]
    fn test_forty_day_pair_with_presence_example() {
        // liquidity 15000, fdv 300000, 40 days old, website + twitter.
        let pair = healthy_pair();
        let verification = verification_for(&pair);
        let checklist = build_checklist(&pair, &verification);

        // 15000 > 10000 but below the verified tier's 50000 floor.
        assert_eq!(find(&checklist, "Liquidity Locked").status, CheckStatus::Pass);
        assert_eq!(
            find(&checklist, "Developer Reputation").status,
            CheckStatus::Warning
        );
        assert_eq!(find(&checklist, "Honeypot Detection").status, CheckStatus::Pass);
        assert_eq!(find(&checklist, "Contract Verified").status, CheckStatus::Pass);
    }

    #[test]
    fn test_liquidity_ratio_boundary_is_strict() {
        // 15000 / 300000 is exactly 5.00%; the rule is strictly greater
        // than, so the boundary itself does not pass.
        let mut pair = healthy_pair();
        let verification = verification_for(&pair);
        let checklist = build_checklist(&pair, &verification);
        let ratio = find(&checklist, "Liquidity Ratio");
        assert_eq!(ratio.status, CheckStatus::Warning);
        assert!(ratio.description.contains("5.00%"));

        // 4.999% stays below.
        pair.liquidity.usd = 14_997.0;
        let checklist = build_checklist(&pair, &verification);
        assert_eq!(find(&checklist, "Liquidity Ratio").status, CheckStatus::Warning);

        // Just above the threshold passes.
        pair.liquidity.usd = 15_100.0;
        let checklist = build_checklist(&pair, &verification);
        assert_eq!(find(&checklist, "Liquidity Ratio").status, CheckStatus::Pass);
    }

    #[test]
    fn test_liquidity_ratio_with_zero_fdv_warns() {
        let mut pair = healthy_pair();
        pair.fdv = 0.0;
        let verification = verification_for(&pair);
        let checklist = build_checklist(&pair, &verification);
        let ratio = find(&checklist, "Liquidity Ratio");
        assert_eq!(ratio.status, CheckStatus::Warning);
        assert!(ratio.description.contains("0.00%"));
    }

    #[test]
    fn test_stub_plagiarism_never_reads_as_pass() {
        let pair = healthy_pair();
        let checklist = build_checklist(&pair, &verification_for(&pair));
        assert_eq!(
            find(&checklist, "Code Originality").status,
            CheckStatus::Warning
        );
    }

    #[test]
    fn test_no_sells_flags_honeypot() {
        let mut pair = healthy_pair();
        pair.txns.h24.sells = 0;
        let verification = verification_for(&pair);
        let checklist = build_checklist(&pair, &verification);
        assert_eq!(find(&checklist, "Honeypot Detection").status, CheckStatus::Fail);
        // 40 buys vs 0 sells still satisfies the buy/sell balance rule.
        assert_eq!(find(&checklist, "Buy/Sell Balance").status, CheckStatus::Pass);
    }

    #[test]
    fn test_score_bounds_on_empty_and_all_fail() {
        assert_eq!(overall_score(&[]), 0);
        let failing = vec![check("X", CheckStatus::Fail, String::new()); 12];
        assert_eq!(overall_score(&failing), 0);
        let passing = vec![check("X", CheckStatus::Pass, String::new()); 12];
        assert_eq!(overall_score(&passing), 100);
    }
}
