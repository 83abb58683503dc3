pub mod checks;
pub mod config;
pub mod dexscreener;
pub mod error;
pub mod github;
pub mod models;
pub mod rules;
pub mod signal;
pub mod verified;
