//! Manually-curated token allow-list. Entries are vetted by hand and
//! matched by exact, case-insensitive address comparison.

use crate::models::ManuallyVerifiedToken;

pub static MANUALLY_VERIFIED_TOKENS: &[ManuallyVerifiedToken] = &[
    ManuallyVerifiedToken {
        address: "WARDmUpYMKh6V42Uod2P1MNUcY1TCJ5RXuiUDKs8Wpf",
        name: "Ward AI",
        symbol: "WARD",
        github_url: Some("https://github.com/ward-ai/ward-ai-core"),
        verified_date: "2024-01-15",
        notes: Some("Official Ward AI security platform token"),
        category: Some("Utility"),
    },
    ManuallyVerifiedToken {
        address: "9ezFthWrDUpSSeMdpLW6SDD9TJigHdc4AuQ5QN5bpump",
        name: "XerisCoin",
        symbol: "XERIS",
        github_url: Some("https://github.com/ZZachWWins/xeriscoin_testnet_localalpha_v1"),
        verified_date: "2024-01-20",
        notes: Some("Manually verified by the Ward AI team"),
        category: Some("DeFi"),
    },
    ManuallyVerifiedToken {
        address: "8J69rbLTzWWgUJziFY8jeu5tDwEPBwUz4pKBMr5rpump",
        name: "Memecoin",
        symbol: "MEME",
        github_url: None,
        verified_date: "2024-01-20",
        notes: Some("Verified memecoin project"),
        category: Some("Memecoin"),
    },
    ManuallyVerifiedToken {
        address: "C2omVhcvt3DDY77S2KZzawFJQeETZofgZ4eNWWkXpump",
        name: "Memecoin",
        symbol: "MEME",
        github_url: None,
        verified_date: "2024-01-20",
        notes: Some("Verified memecoin project"),
        category: Some("Memecoin"),
    },
];

pub fn lookup(address: &str) -> Option<&'static ManuallyVerifiedToken> {
    MANUALLY_VERIFIED_TOKENS
        .iter()
        .find(|token| token.address.eq_ignore_ascii_case(address))
}

pub fn is_verified(address: &str) -> bool {
    lookup(address).is_some()
}
