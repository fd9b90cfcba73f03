use crate::core::currency::{CurrencyCode, RateTable};
use crate::core::pool::{Pool, PoolLedger};
use crate::core::transaction::{FraudFlag, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Width of the velocity window in milliseconds.
pub const VELOCITY_WINDOW_MS: i64 = 60_000;

/// Prior same-sender transactions inside the window needed to fire the
/// velocity rule. The candidate itself is not counted.
pub const VELOCITY_PRIOR_THRESHOLD: usize = 3;

/// Share of the fiat pool above which a payment counts as high value.
pub const HIGH_VALUE_POOL_FRACTION: Decimal = dec!(0.05);

const REWARD_DELTA: i64 = 1;
const HIGH_VALUE_DELTA: i64 = -10;
const VELOCITY_DELTA: i64 = -20;
const GEO_DELTA: i64 = -5;

/// Outcome of running every fraud rule against one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudVerdict {
    /// Flags in rule evaluation order, one per rule that fired.
    pub flags: Vec<FraudFlag>,
    /// Trust adjustment for the sender. Overwrite semantics: the last rule
    /// that fired decides the delta, a clean payment earns +1.
    pub trust_delta: i64,
}

/// Rule-based fraud screening.
///
/// A pure function of the candidate transaction, the trailing history, and
/// the current pool snapshot. Runs after pool mutation, so the high-value
/// rule compares against post-payment reserves.
pub struct FraudEvaluator;

impl FraudEvaluator {
    /// Evaluate all rules in fixed order.
    ///
    /// # Algorithm
    ///
    /// 1. High value: fiat-equivalent receiver value strictly above 5% of
    ///    the current fiat pool. Flag, delta -10.
    /// 2. Velocity: at least 3 prior payments from the same sender strictly
    ///    inside the trailing 60 s. Flag, delta -20.
    /// 3. Geo risk: the caller marked the request geo-risky. Flag, delta -5.
    ///
    /// Flags accumulate; the delta does not. Each firing rule overwrites the
    /// delta, so a payment tripping rules 1 and 2 ends at -20, not -30.
    pub fn evaluate(
        candidate: &Transaction,
        prior: &[Transaction],
        pools: &PoolLedger,
        rates: &RateTable,
    ) -> FraudVerdict {
        let mut flags = Vec::new();
        let mut trust_delta = REWARD_DELTA;

        // Rule 1: high value relative to the fiat pool.
        let fiat_value = Self::fiat_equivalent(candidate, rates);
        if fiat_value > pools.balance(Pool::Fiat) * HIGH_VALUE_POOL_FRACTION {
            flags.push(FraudFlag::HighValueThresholdExceeded);
            trust_delta = HIGH_VALUE_DELTA;
        }

        // Rule 2: sender velocity. Scans the full history, not a fixed
        // window, so cost grows with total transaction count.
        let recent = prior
            .iter()
            .filter(|t| {
                t.sender_id == candidate.sender_id
                    && candidate
                        .created_at
                        .signed_duration_since(t.created_at)
                        .num_milliseconds()
                        < VELOCITY_WINDOW_MS
            })
            .count();
        if recent >= VELOCITY_PRIOR_THRESHOLD {
            flags.push(FraudFlag::VelocityLimitExceeded);
            trust_delta = VELOCITY_DELTA;
        }

        // Rule 3: caller-declared geo risk.
        if candidate.geo_risk_flag {
            flags.push(FraudFlag::GeoLocationMismatch);
            trust_delta = GEO_DELTA;
        }

        FraudVerdict { flags, trust_delta }
    }

    /// Receiver amount normalized to fiat for threshold comparison.
    ///
    /// INR is taken at face value. Every other receiver currency is
    /// converted with the USD->INR rate, used as a blunt universal
    /// converter even when the receiver settles in BTC.
    fn fiat_equivalent(candidate: &Transaction, rates: &RateTable) -> Decimal {
        if candidate.receiver_currency.as_str() == "INR" {
            candidate.receiver_amount
        } else {
            let usd_to_inr = rates
                .rate(&CurrencyCode::new("USD"), &CurrencyCode::new("INR"))
                .unwrap_or(Decimal::ONE);
            candidate.receiver_amount * usd_to_inr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::user::UserId;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;

    const BASE_MS: i64 = 1_700_000_000_000;

    fn at(offset_ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(BASE_MS + offset_ms).unwrap()
    }

    fn tx(
        sender: &str,
        offset_ms: i64,
        receiver_currency: &str,
        receiver_amount: Decimal,
        geo_risk: bool,
    ) -> Transaction {
        Transaction {
            id: format!("tx_{offset_ms}"),
            created_at: at(offset_ms),
            sender_id: UserId::from(sender),
            receiver_id: UserId::from("bob"),
            sender_currency: CurrencyCode::new("BTC"),
            receiver_currency: CurrencyCode::new(receiver_currency),
            sender_amount: receiver_amount,
            receiver_amount,
            exchange_rate: Decimal::ONE,
            pool_deltas: BTreeMap::new(),
            geo_risk_flag: geo_risk,
            fraud_flags: vec![],
            trust_delta: 0,
        }
    }

    #[test]
    fn test_clean_payment_earns_reward() {
        let candidate = tx("alice", 0, "INR", dec!(100), false);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert!(verdict.flags.is_empty());
        assert_eq!(verdict.trust_delta, 1);
    }

    #[test]
    fn test_high_value_fires_above_five_percent() {
        // Seed fiat pool is 500_000, threshold 25_000.
        let candidate = tx("alice", 0, "INR", dec!(25_001), false);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert_eq!(verdict.flags, vec![FraudFlag::HighValueThresholdExceeded]);
        assert_eq!(verdict.trust_delta, -10);
    }

    #[test]
    fn test_exactly_five_percent_does_not_fire() {
        let candidate = tx("alice", 0, "INR", dec!(25_000), false);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert!(verdict.flags.is_empty());
        assert_eq!(verdict.trust_delta, 1);
    }

    #[test]
    fn test_non_fiat_receiver_converts_at_usd_rate() {
        // 400 USD * 83 = 33_200 fiat-equivalent, above the 25_000 threshold.
        let candidate = tx("alice", 0, "USD", dec!(400), false);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert_eq!(verdict.flags, vec![FraudFlag::HighValueThresholdExceeded]);
    }

    #[test]
    fn test_btc_receiver_also_converts_at_usd_rate() {
        // The converter is applied to any non-INR receiver, BTC included.
        let candidate = tx("alice", 0, "BTC", dec!(400), false);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert_eq!(verdict.flags, vec![FraudFlag::HighValueThresholdExceeded]);
    }

    #[test]
    fn test_velocity_needs_three_priors() {
        let prior = vec![
            tx("alice", 0, "INR", dec!(1), false),
            tx("alice", 1_000, "INR", dec!(1), false),
        ];
        let candidate = tx("alice", 2_000, "INR", dec!(1), false);
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert!(verdict.flags.is_empty());

        let mut prior = prior;
        prior.push(tx("alice", 1_500, "INR", dec!(1), false));
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert_eq!(verdict.flags, vec![FraudFlag::VelocityLimitExceeded]);
        assert_eq!(verdict.trust_delta, -20);
    }

    #[test]
    fn test_velocity_window_is_strict() {
        // A prior exactly 60s older sits on the boundary and does not count.
        let prior = vec![
            tx("alice", 0, "INR", dec!(1), false),
            tx("alice", 30_000, "INR", dec!(1), false),
            tx("alice", 40_000, "INR", dec!(1), false),
        ];
        let candidate = tx("alice", 60_000, "INR", dec!(1), false);
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert!(verdict.flags.is_empty());
    }

    #[test]
    fn test_velocity_ignores_other_senders() {
        let prior = vec![
            tx("charlie", 0, "INR", dec!(1), false),
            tx("charlie", 100, "INR", dec!(1), false),
            tx("charlie", 200, "INR", dec!(1), false),
        ];
        let candidate = tx("alice", 300, "INR", dec!(1), false);
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert!(verdict.flags.is_empty());
    }

    #[test]
    fn test_later_rule_overwrites_delta() {
        let prior = vec![
            tx("alice", 0, "INR", dec!(1), false),
            tx("alice", 100, "INR", dec!(1), false),
            tx("alice", 200, "INR", dec!(1), false),
        ];
        let candidate = tx("alice", 300, "INR", dec!(30_000), false);
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert_eq!(
            verdict.flags,
            vec![
                FraudFlag::HighValueThresholdExceeded,
                FraudFlag::VelocityLimitExceeded,
            ]
        );
        assert_eq!(verdict.trust_delta, -20);
    }

    #[test]
    fn test_geo_risk_fires_last() {
        let prior = vec![
            tx("alice", 0, "INR", dec!(1), false),
            tx("alice", 100, "INR", dec!(1), false),
            tx("alice", 200, "INR", dec!(1), false),
        ];
        let candidate = tx("alice", 300, "INR", dec!(1), true);
        let verdict = FraudEvaluator::evaluate(
            &candidate,
            &prior,
            &PoolLedger::seed(),
            &RateTable::seed(),
        );
        assert_eq!(
            verdict.flags,
            vec![
                FraudFlag::VelocityLimitExceeded,
                FraudFlag::GeoLocationMismatch,
            ]
        );
        assert_eq!(verdict.trust_delta, -5);
    }

    #[test]
    fn test_geo_risk_alone() {
        let candidate = tx("alice", 0, "INR", dec!(1), true);
        let verdict =
            FraudEvaluator::evaluate(&candidate, &[], &PoolLedger::seed(), &RateTable::seed());
        assert_eq!(verdict.flags, vec![FraudFlag::GeoLocationMismatch]);
        assert_eq!(verdict.trust_delta, -5);
    }
}
