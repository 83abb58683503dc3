//! Heuristic trading-signal generation with a per-token TTL cache.

use std::collections::HashMap;

use crate::dexscreener::Pair;
use crate::models::{SignalAction, TradingSignal};

pub const SIGNAL_CACHE_TTL_MS: i64 = 30_000;

const BASE_CONFIDENCE: u8 = 50;
const MAX_CONFIDENCE: u8 = 95;

/// Inputs for one token, sampled from its freshest market pair plus the
/// holding's own risk score.
#[derive(Debug, Clone, Default)]
pub struct SignalInputs {
    pub price: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
    pub buys_1h: u64,
    pub sells_1h: u64,
    pub risk_score: u8,
}

impl SignalInputs {
    pub fn from_pair(pair: &Pair, risk_score: u8) -> Self {
        Self {
            price: pair.price_usd,
            change_1h: pair.price_change.h1,
            change_6h: pair.price_change.h6,
            change_24h: pair.price_change.h24,
            volume_24h: pair.volume.h24,
            liquidity: pair.liquidity.usd,
            buys_1h: pair.txns.h1.buys,
            sells_1h: pair.txns.h1.sells,
            risk_score,
        }
    }
}

/// Ordered heuristic rules; later rules override the action chosen by
/// earlier ones, so evaluation order is part of the contract:
/// momentum, reversal, volume surge, downward momentum, pump-dump,
/// risk-score override, low-volatility hold.
pub fn generate_signal(inputs: &SignalInputs, now_ms: i64) -> TradingSignal {
    let total_txns = inputs.buys_1h + inputs.sells_1h;
    let buy_pressure = if total_txns == 0 {
        0.5
    } else {
        inputs.buys_1h as f64 / total_txns as f64
    };
    let volume_to_liquidity = if inputs.liquidity > 0.0 {
        inputs.volume_24h / inputs.liquidity
    } else {
        0.0
    };

    let mut action = SignalAction::Hold;
    let mut confidence: u32 = BASE_CONFIDENCE as u32;
    let mut reasons: Vec<String> = Vec::new();

    if inputs.change_1h > 5.0 && buy_pressure > 0.6 {
        action = SignalAction::Buy;
        confidence += 20;
        reasons.push("Strong upward momentum with buy pressure".to_string());
    }

    if inputs.change_24h < -15.0 && inputs.change_1h > 3.0 {
        action = SignalAction::Buy;
        confidence += 15;
        reasons.push("Potential reversal after dip".to_string());
    }

    if volume_to_liquidity > 3.0 && buy_pressure > 0.55 {
        action = SignalAction::Buy;
        confidence += 10;
        reasons.push("High volume with buying interest".to_string());
    }

    if inputs.change_1h < -5.0 && buy_pressure < 0.4 {
        action = SignalAction::Sell;
        confidence += 20;
        reasons.push("Downward momentum with sell pressure".to_string());
    }

    if inputs.change_24h > 50.0 && inputs.change_1h < -8.0 {
        action = SignalAction::Sell;
        confidence += 25;
        reasons.push("Profit-taking after pump, potential dump".to_string());
    }

    if inputs.risk_score > 70 {
        action = SignalAction::Sell;
        confidence += 15;
        reasons.push("High risk score detected".to_string());
    }

    if inputs.change_1h.abs() < 2.0 && inputs.change_6h.abs() < 5.0 {
        action = SignalAction::Hold;
        confidence = 60;
        reasons.push("Low volatility, waiting for clear direction".to_string());
    }

    let volatility_factor = inputs.change_24h.abs() / 100.0;
    let stop_loss_percent = 0.05 + volatility_factor;
    let take_profit_percent = 0.10 + volatility_factor * 2.0;

    let entry_price = inputs.price;
    let (stop_loss, take_profit) = match action {
        SignalAction::Buy => (
            entry_price * (1.0 - stop_loss_percent),
            entry_price * (1.0 + take_profit_percent),
        ),
        SignalAction::Sell | SignalAction::Hold => (
            entry_price * (1.0 + stop_loss_percent),
            entry_price * (1.0 - take_profit_percent),
        ),
    };

    let risk_amount = (entry_price - stop_loss).abs();
    let reward_amount = (take_profit - entry_price).abs();
    let risk_reward = if risk_amount > 0.0 {
        reward_amount / risk_amount
    } else {
        0.0
    };

    if reasons.is_empty() {
        reasons.push("Market conditions unclear".to_string());
    }

    TradingSignal {
        action,
        confidence: confidence.min(MAX_CONFIDENCE as u32) as u8,
        entry_price,
        stop_loss,
        take_profit,
        risk_reward,
        reasons,
        timestamp: now_ms,
    }
}

/// Neutral signal served when market data is unavailable and no cached
/// signal exists: HOLD around the last known price, -5% / +10%.
pub fn fallback_hold(last_price: f64, now_ms: i64) -> TradingSignal {
    TradingSignal {
        action: SignalAction::Hold,
        confidence: BASE_CONFIDENCE,
        entry_price: last_price,
        stop_loss: last_price * 0.95,
        take_profit: last_price * 1.10,
        risk_reward: 2.0,
        reasons: vec!["Analyzing...".to_string()],
        timestamp: now_ms,
    }
}

struct CachedSignal {
    signal: TradingSignal,
    inserted_at: i64,
}

/// Per-address signal cache bounding upstream call volume to one fetch
/// per token per TTL window.
pub struct SignalCache {
    ttl_ms: i64,
    entries: HashMap<String, CachedSignal>,
}

impl SignalCache {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    /// A signal younger than the TTL, returned untouched.
    pub fn fresh(&self, address: &str, now_ms: i64) -> Option<&TradingSignal> {
        self.entries
            .get(address)
            .filter(|c| now_ms - c.inserted_at <= self.ttl_ms)
            .map(|c| &c.signal)
    }

    /// Any cached signal regardless of age; used when the upstream fetch
    /// fails and stale data beats no data.
    pub fn stale(&self, address: &str) -> Option<&TradingSignal> {
        self.entries.get(address).map(|c| &c.signal)
    }

    pub fn insert(&mut self, address: impl Into<String>, signal: TradingSignal, now_ms: i64) {
        self.entries.insert(
            address.into(),
            CachedSignal {
                signal,
                inserted_at: now_ms,
            },
        );
    }
}

impl Default for SignalCache {
    fn default() -> Self {
        Self::new(SIGNAL_CACHE_TTL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn quiet_inputs() -> SignalInputs {
        SignalInputs {
            price: 1.0,
            change_1h: 0.5,
            change_6h: 1.0,
            change_24h: 2.0,
            volume_24h: 1_000.0,
            liquidity: 10_000.0,
            buys_1h: 10,
            sells_1h: 10,
            risk_score: 20,
        }
    }

    #[test]
    fn test_buy_pressure_defaults_to_half_without_transactions() {
        // No transactions and flat prices: only the low-volatility rule
        // fires, which is exactly what a 0.5 buy pressure implies.
        let inputs = SignalInputs {
            buys_1h: 0,
            sells_1h: 0,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.confidence, 60);
    }

    #[test]
    fn test_momentum_buy() {
        let inputs = SignalInputs {
            change_1h: 6.0,
            change_6h: 10.0,
            buys_1h: 70,
            sells_1h: 30,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.confidence, 70);
        assert!(signal.stop_loss < signal.entry_price);
        assert!(signal.take_profit > signal.entry_price);
    }

    #[test]
    fn test_risk_score_overrides_earlier_buy() {
        let inputs = SignalInputs {
            change_1h: 6.0,
            change_6h: 10.0,
            buys_1h: 70,
            sells_1h: 30,
            risk_score: 80,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Sell);
        // 50 + 20 (momentum) + 15 (risk) = 85.
        assert_eq!(signal.confidence, 85);
        assert!(signal
            .reasons
            .iter()
            .any(|r| r.contains("High risk score")));
    }

    #[test]
    fn test_pump_dump_rule_and_confidence_cap() {
        let inputs = SignalInputs {
            change_1h: -10.0,
            change_6h: 20.0,
            change_24h: 60.0,
            buys_1h: 10,
            sells_1h: 40,
            risk_score: 80,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Sell);
        // 50 + 20 + 25 + 15 = 110, capped.
        assert_eq!(signal.confidence, 95);
    }

    #[test]
    fn test_low_volatility_forces_hold_at_sixty() {
        let inputs = quiet_inputs();
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.confidence, 60);
        assert_eq!(
            signal.reasons,
            vec!["Low volatility, waiting for clear direction".to_string()]
        );
    }

    #[test]
    fn test_risk_reward_is_zero_when_price_is_zero() {
        let inputs = SignalInputs {
            price: 0.0,
            change_1h: 6.0,
            change_6h: 10.0,
            buys_1h: 70,
            sells_1h: 30,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.risk_reward, 0.0);
    }

    #[test]
    fn test_zero_liquidity_zeroes_volume_ratio() {
        // Would otherwise divide by zero; the volume-surge rule must not
        // fire.
        let inputs = SignalInputs {
            liquidity: 0.0,
            volume_24h: 1_000_000.0,
            buys_1h: 70,
            sells_1h: 30,
            ..quiet_inputs()
        };
        let signal = generate_signal(&inputs, NOW);
        assert_eq!(signal.action, SignalAction::Hold);
    }

    #[test]
    fn test_fallback_hold_shape() {
        let signal = fallback_hold(2.0, NOW);
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.confidence, 50);
        assert_eq!(signal.stop_loss, 2.0 * 0.95);
        assert_eq!(signal.take_profit, 2.0 * 1.10);
        assert_eq!(signal.risk_reward, 2.0);
    }

    #[test]
    fn test_cache_returns_identical_signal_within_ttl() {
        let mut cache = SignalCache::default();
        let signal = generate_signal(&quiet_inputs(), NOW);
        cache.insert("addr", signal.clone(), NOW);

        let hit = cache.fresh("addr", NOW + 29_999).expect("fresh hit");
        assert_eq!(*hit, signal);
        assert_eq!(hit.timestamp, signal.timestamp);
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let mut cache = SignalCache::default();
        cache.insert("addr", fallback_hold(1.0, NOW), NOW);

        assert!(cache.fresh("addr", NOW + 30_001).is_none());
        // Stale lookup still serves it for the failure path.
        assert!(cache.stale("addr").is_some());
    }
}
