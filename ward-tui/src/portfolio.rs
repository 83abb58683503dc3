//! Portfolio view state machine: Idle -> Loading -> Monitoring <->
//! Refreshing. While monitoring, three guarded timers run: a 10s full
//! refresh, a 2s display-only price jitter, and a 1s countdown label.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use ward_core::models::{TokenHolding, TradingSignal};
use ward_core::signal::{self, SignalCache, SignalInputs};

use crate::tasks::TaskGuard;

pub const REFRESH_INTERVAL_SECS: u64 = 10;
pub const JITTER_INTERVAL_SECS: u64 = 2;
pub const COUNTDOWN_INTERVAL_SECS: u64 = 1;
pub const SIGNAL_INTERVAL_SECS: u64 = 30;
/// Gap between per-token market lookups in one signal sweep.
pub const SIGNAL_FETCH_GAP_MS: u64 = 200;

/// Maximum magnitude of the cosmetic price perturbation (0.2%).
const JITTER_RANGE: f64 = 0.002;

const DEV_HOLDING_ALERT_PERCENT: f64 = 10.0;
const TOP_HOLDER_ALERT_PERCENT: f64 = 15.0;
const RISK_SCORE_ALERT: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Monitoring,
    Refreshing,
}

/// One token's market sample from a signal sweep; `inputs` is `None` when
/// the upstream lookup failed.
pub struct SignalSample {
    pub address: String,
    pub last_price: f64,
    pub inputs: Option<SignalInputs>,
}

pub struct PortfolioState {
    pub wallet_input: String,
    pub phase: Phase,
    /// Last holdings as fetched; refreshed every cycle.
    pub holdings: Vec<TokenHolding>,
    /// Display copy carrying the cosmetic jitter. Never sent upstream.
    pub live: Vec<TokenHolding>,
    pub total_value: f64,
    pub alerts: Vec<String>,
    pub last_update: Option<DateTime<Utc>>,
    pub next_refresh_in: u8,
    pub signals: HashMap<String, TradingSignal>,
    pub signal_cache: SignalCache,
    pub error: Option<String>,
    pub refresh_guard: Option<TaskGuard>,
    pub jitter_guard: Option<TaskGuard>,
    pub countdown_guard: Option<TaskGuard>,
    pub signal_guard: Option<TaskGuard>,
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self {
            wallet_input: String::new(),
            phase: Phase::Idle,
            holdings: Vec::new(),
            live: Vec::new(),
            total_value: 0.0,
            alerts: Vec::new(),
            last_update: None,
            next_refresh_in: REFRESH_INTERVAL_SECS as u8,
            signals: HashMap::new(),
            signal_cache: SignalCache::default(),
            error: None,
            refresh_guard: None,
            jitter_guard: None,
            countdown_guard: None,
            signal_guard: None,
        }
    }
}

pub fn derive_alerts(holdings: &[TokenHolding]) -> Vec<String> {
    let mut alerts = Vec::new();
    for holding in holdings {
        if holding.suspicious_activity {
            alerts.push(format!(
                "{}: Suspicious wallet activity detected",
                holding.symbol
            ));
        }
        if holding.dev_holding > DEV_HOLDING_ALERT_PERCENT {
            alerts.push(format!(
                "{}: High dev holding ({:.1}%)",
                holding.symbol, holding.dev_holding
            ));
        }
        if holding.top_holder_percent > TOP_HOLDER_ALERT_PERCENT {
            alerts.push(format!(
                "{}: Top holder controls {:.1}% of supply",
                holding.symbol, holding.top_holder_percent
            ));
        }
        if holding.risk_score > RISK_SCORE_ALERT {
            alerts.push(format!(
                "{}: High risk score ({}/100)",
                holding.symbol, holding.risk_score
            ));
        }
    }
    alerts
}

impl PortfolioState {
    pub fn begin_monitor(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    pub fn begin_refresh(&mut self) {
        if self.phase == Phase::Monitoring {
            self.phase = Phase::Refreshing;
        }
    }

    pub fn apply_holdings(
        &mut self,
        holdings: Vec<TokenHolding>,
        total_value: f64,
        now: DateTime<Utc>,
    ) {
        // A fetch that resolves after stop_monitoring must not restart
        // the view; the one-shot fetch task has no guard, so the state
        // machine is the backstop.
        if self.phase == Phase::Idle {
            return;
        }
        self.alerts = derive_alerts(&holdings);
        self.live = holdings.clone();
        self.holdings = holdings;
        self.total_value = total_value;
        self.last_update = Some(now);
        self.next_refresh_in = REFRESH_INTERVAL_SECS as u8;
        self.phase = Phase::Monitoring;
        self.error = None;
    }

    /// A failed refresh keeps showing stale data when prior data exists;
    /// only an initial failure empties the view.
    pub fn apply_fetch_error(&mut self, message: String) {
        if self.phase == Phase::Idle {
            return;
        }
        if self.holdings.is_empty() {
            self.phase = Phase::Idle;
            self.error = Some(message);
            self.stop_timers();
        } else {
            self.phase = Phase::Monitoring;
        }
    }

    /// Cosmetic +/-0.2% movement on displayed price and value only.
    pub fn apply_jitter<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != Phase::Monitoring && self.phase != Phase::Refreshing {
            return;
        }
        for holding in &mut self.live {
            let factor = (rng.gen::<f64>() - 0.5) * (JITTER_RANGE * 2.0);
            holding.price *= 1.0 + factor;
            holding.value = holding.price * holding.balance;
        }
    }

    pub fn countdown_tick(&mut self) {
        self.next_refresh_in = if self.next_refresh_in <= 1 {
            REFRESH_INTERVAL_SECS as u8
        } else {
            self.next_refresh_in - 1
        };
    }

    /// Non-SOL holdings that need a fresh market sample this sweep.
    pub fn signal_targets(&self, now_ms: i64) -> Vec<(String, f64, u8)> {
        self.holdings
            .iter()
            .filter(|h| h.symbol != "SOL")
            .filter(|h| self.signal_cache.fresh(&h.address, now_ms).is_none())
            .map(|h| (h.address.clone(), h.price, h.risk_score))
            .collect()
    }

    /// Fold one market sample into the signal map. Failed lookups fall
    /// back to the stale cache entry, then to a neutral hold. Samples
    /// landing after the monitor stopped are dropped.
    pub fn record_sample(&mut self, sample: SignalSample, now_ms: i64) {
        if self.phase == Phase::Idle {
            return;
        }
        let signal = match sample.inputs {
            Some(inputs) => {
                let signal = signal::generate_signal(&inputs, now_ms);
                self.signal_cache
                    .insert(sample.address.clone(), signal.clone(), now_ms);
                signal
            }
            None => self
                .signal_cache
                .stale(&sample.address)
                .cloned()
                .unwrap_or_else(|| signal::fallback_hold(sample.last_price, now_ms)),
        };
        self.signals.insert(sample.address, signal);
    }

    pub fn average_risk_score(&self) -> u8 {
        if self.live.is_empty() {
            return 0;
        }
        let sum: u32 = self.live.iter().map(|h| h.risk_score as u32).sum();
        ((sum as f64 / self.live.len() as f64).round()) as u8
    }

    pub fn live_total_value(&self) -> f64 {
        self.live.iter().map(|h| h.value).sum()
    }

    pub fn stop_monitoring(&mut self) {
        self.phase = Phase::Idle;
        self.stop_timers();
    }

    fn stop_timers(&mut self) {
        self.refresh_guard = None;
        self.jitter_guard = None;
        self.countdown_guard = None;
        self.signal_guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn holding(symbol: &str, price: f64, balance: f64) -> TokenHolding {
        TokenHolding {
            address: format!("{symbol}Mint"),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            balance,
            value: price * balance,
            price,
            price_change_24h: 0.0,
            risk_score: 20,
            alerts: Vec::new(),
            liquidity: 50_000.0,
            holders: 100,
            top_holder_percent: 5.0,
            dev_holding: 2.0,
            suspicious_activity: false,
        }
    }

    const NOW_MS: i64 = 1_700_000_000_000;

    #[test]
    fn test_apply_holdings_transitions_to_monitoring() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        assert_eq!(state.phase, Phase::Loading);

        state.apply_holdings(vec![holding("WARD", 0.05, 1000.0)], 50.0, Utc::now());
        assert_eq!(state.phase, Phase::Monitoring);
        assert_eq!(state.live.len(), 1);
        assert_eq!(state.next_refresh_in, 10);
    }

    #[test]
    fn test_fetch_error_keeps_stale_data() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_holdings(vec![holding("WARD", 0.05, 1000.0)], 50.0, Utc::now());

        state.begin_refresh();
        state.apply_fetch_error("upstream timeout".to_string());

        assert_eq!(state.phase, Phase::Monitoring);
        assert_eq!(state.holdings.len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_initial_fetch_error_empties_view() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_fetch_error("wallet not found".to_string());

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.error.as_deref(), Some("wallet not found"));
    }

    #[test]
    fn test_jitter_stays_within_bounds_and_never_touches_base() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_holdings(vec![holding("WARD", 100.0, 10.0)], 1000.0, Utc::now());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            state.apply_jitter(&mut rng);
        }

        // Base holdings are untouched; 50 compounded ticks of +/-0.2%
        // stay well inside +/-11%.
        assert_eq!(state.holdings[0].price, 100.0);
        let live_price = state.live[0].price;
        assert!(live_price > 89.0 && live_price < 111.0);
        assert_eq!(state.live[0].value, live_price * 10.0);
    }

    #[test]
    fn test_countdown_resets_to_ten() {
        let mut state = PortfolioState::default();
        state.next_refresh_in = 2;
        state.countdown_tick();
        assert_eq!(state.next_refresh_in, 1);
        state.countdown_tick();
        assert_eq!(state.next_refresh_in, 10);
    }

    #[test]
    fn test_alerts_derived_per_rule() {
        let mut risky = holding("DEGEN", 0.01, 100.0);
        risky.dev_holding = 12.0;
        risky.top_holder_percent = 20.0;
        risky.risk_score = 70;
        risky.suspicious_activity = true;

        let alerts = derive_alerts(&[holding("WARD", 0.05, 100.0), risky]);
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().all(|a| a.starts_with("DEGEN")));
    }

    #[test]
    fn test_signal_targets_skip_sol_and_fresh_cache() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_holdings(
            vec![
                holding("SOL", 150.0, 2.0),
                holding("WARD", 0.05, 1000.0),
                holding("MEME", 0.001, 500_000.0),
            ],
            0.0,
            Utc::now(),
        );

        state
            .signal_cache
            .insert("WARDMint", ward_core::signal::fallback_hold(0.05, NOW_MS), NOW_MS);

        let targets = state.signal_targets(NOW_MS + 1_000);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, "MEMEMint");
    }

    #[test]
    fn test_failed_sample_serves_stale_then_fallback() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_holdings(vec![holding("MEME", 2.0, 10.0)], 20.0, Utc::now());

        // No cache entry: neutral hold centered on last price.
        state.record_sample(
            SignalSample {
                address: "MEMEMint".to_string(),
                last_price: 2.0,
                inputs: None,
            },
            NOW_MS,
        );
        let fallback = &state.signals["MEMEMint"];
        assert_eq!(fallback.entry_price, 2.0);
        assert_eq!(fallback.stop_loss, 2.0 * 0.95);

        // With a stale entry, the stale signal is preferred.
        let stale = ward_core::signal::fallback_hold(9.0, NOW_MS - 120_000);
        state
            .signal_cache
            .insert("MEMEMint", stale.clone(), NOW_MS - 120_000);
        state.record_sample(
            SignalSample {
                address: "MEMEMint".to_string(),
                last_price: 2.0,
                inputs: None,
            },
            NOW_MS,
        );
        assert_eq!(state.signals["MEMEMint"], stale);
    }

    #[test]
    fn test_holdings_arriving_after_stop_are_dropped() {
        // The one-shot fetch has no abort guard; a response that lands
        // after Esc must not restart monitoring.
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.stop_monitoring();

        state.apply_holdings(vec![holding("WARD", 0.05, 1000.0)], 50.0, Utc::now());

        assert_eq!(state.phase, Phase::Idle);
        assert!(state.holdings.is_empty());
        assert!(state.last_update.is_none());
    }

    #[test]
    fn test_fetch_error_after_stop_is_dropped() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.stop_monitoring();

        state.apply_fetch_error("upstream timeout".to_string());

        assert_eq!(state.phase, Phase::Idle);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_sample_arriving_after_stop_is_dropped() {
        let mut state = PortfolioState::default();
        state.begin_monitor();
        state.apply_holdings(vec![holding("MEME", 2.0, 10.0)], 20.0, Utc::now());
        state.stop_monitoring();

        state.record_sample(
            SignalSample {
                address: "MEMEMint".to_string(),
                last_price: 2.0,
                inputs: None,
            },
            NOW_MS,
        );

        assert!(state.signals.is_empty());
    }

    #[test]
    fn test_average_risk_score() {
        let mut state = PortfolioState::default();
        let mut a = holding("A", 1.0, 1.0);
        let mut b = holding("B", 1.0, 1.0);
        a.risk_score = 30;
        b.risk_score = 51;
        state.begin_monitor();
        state.apply_holdings(vec![a, b], 2.0, Utc::now());
        assert_eq!(state.average_risk_score(), 41);
    }
}
