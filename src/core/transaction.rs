use crate::core::currency::CurrencyCode;
use crate::core::pool::Pool;
use crate::core::user::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named fraud signal attached to a transaction.
///
/// Serialized in SCREAMING_SNAKE_CASE, e.g. `VELOCITY_LIMIT_EXCEEDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudFlag {
    HighValueThresholdExceeded,
    VelocityLimitExceeded,
    GeoLocationMismatch,
}

impl FraudFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlag::HighValueThresholdExceeded => "HIGH_VALUE_THRESHOLD_EXCEEDED",
            FraudFlag::VelocityLimitExceeded => "VELOCITY_LIMIT_EXCEEDED",
            FraudFlag::GeoLocationMismatch => "GEO_LOCATION_MISMATCH",
        }
    }
}

impl fmt::Display for FraudFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An executed cross-currency payment.
///
/// Immutable once appended to history: fraud evaluation runs before the
/// append, so `fraud_flags` and `trust_delta` are final by the time anyone
/// else can observe the record.
///
/// Field names follow the JSON wire format of the HTTP surface where they
/// differ (`timestamp`, `from_id`, `to_id`, `pool_changes`, `geo_risk`,
/// `trust_score_delta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequence-prefixed identifier, order-stable under sequential
    /// processing even when two payments share a millisecond.
    pub id: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "from_id")]
    pub sender_id: UserId,
    #[serde(rename = "to_id")]
    pub receiver_id: UserId,
    pub sender_currency: CurrencyCode,
    pub receiver_currency: CurrencyCode,
    pub sender_amount: Decimal,
    pub receiver_amount: Decimal,
    pub exchange_rate: Decimal,
    #[serde(rename = "pool_changes")]
    pub pool_deltas: BTreeMap<Pool, Decimal>,
    #[serde(rename = "geo_risk")]
    pub geo_risk_flag: bool,
    pub fraud_flags: Vec<FraudFlag>,
    #[serde(rename = "trust_score_delta")]
    pub trust_delta: i64,
}

impl Transaction {
    /// Whether any fraud rule fired on this payment.
    pub fn is_flagged(&self) -> bool {
        !self.fraud_flags.is_empty()
    }

    /// The delta this transaction applied to a given pool, zero if none.
    pub fn pool_delta(&self, pool: Pool) -> Decimal {
        self.pool_deltas.get(&pool).copied().unwrap_or(Decimal::ZERO)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} pays {} {} {} -> {} {} (rate {})",
            self.id,
            self.sender_id,
            self.receiver_id,
            self.sender_amount,
            self.sender_currency,
            self.receiver_amount,
            self.receiver_currency,
            self.exchange_rate
        )
    }
}

/// A flagged transaction, denormalized into the alert feed.
///
/// Holds its own copy of the record so the feed stays self-contained even
/// after history is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub flags: Vec<FraudFlag>,
}

impl From<&Transaction> for Alert {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction: transaction.clone(),
            flags: transaction.fraud_flags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_transaction() -> Transaction {
        let mut pool_deltas = BTreeMap::new();
        pool_deltas.insert(Pool::Crypto, dec!(0.01));
        pool_deltas.insert(Pool::Fiat, dec!(-50_000));
        Transaction {
            id: "tx_000001_1700000000000".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            sender_id: UserId::from("alice"),
            receiver_id: UserId::from("bob"),
            sender_currency: CurrencyCode::new("BTC"),
            receiver_currency: CurrencyCode::new("INR"),
            sender_amount: dec!(0.01),
            receiver_amount: dec!(50_000),
            exchange_rate: dec!(5_000_000),
            pool_deltas,
            geo_risk_flag: false,
            fraud_flags: vec![],
            trust_delta: 1,
        }
    }

    #[test]
    fn test_flag_wire_strings() {
        assert_eq!(
            serde_json::to_value(FraudFlag::HighValueThresholdExceeded).unwrap(),
            "HIGH_VALUE_THRESHOLD_EXCEEDED"
        );
        assert_eq!(
            serde_json::to_value(FraudFlag::VelocityLimitExceeded).unwrap(),
            "VELOCITY_LIMIT_EXCEEDED"
        );
        assert_eq!(
            serde_json::to_value(FraudFlag::GeoLocationMismatch).unwrap(),
            "GEO_LOCATION_MISMATCH"
        );
    }

    #[test]
    fn test_transaction_wire_format() {
        let tx = sample_transaction();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["from_id"], "alice");
        assert_eq!(json["to_id"], "bob");
        assert_eq!(json["sender_amount"], 0.01);
        assert_eq!(json["pool_changes"]["crypto"], 0.01);
        assert_eq!(json["pool_changes"]["fiat"], -50_000.0);
        assert_eq!(json["geo_risk"], false);
        assert_eq!(json["trust_score_delta"], 1);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = sample_transaction();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_is_flagged() {
        let mut tx = sample_transaction();
        assert!(!tx.is_flagged());
        tx.fraud_flags.push(FraudFlag::VelocityLimitExceeded);
        assert!(tx.is_flagged());
    }

    #[test]
    fn test_alert_flattens_transaction() {
        let mut tx = sample_transaction();
        tx.fraud_flags = vec![FraudFlag::HighValueThresholdExceeded];
        let alert = Alert::from(&tx);
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["id"], "tx_000001_1700000000000");
        assert_eq!(json["flags"][0], "HIGH_VALUE_THRESHOLD_EXCEEDED");
        assert_eq!(json["fraud_flags"][0], "HIGH_VALUE_THRESHOLD_EXCEEDED");
    }

    #[test]
    fn test_pool_delta_lookup() {
        let tx = sample_transaction();
        assert_eq!(tx.pool_delta(Pool::Crypto), dec!(0.01));
        assert_eq!(tx.pool_delta(Pool::Stablecoin), Decimal::ZERO);
    }
}
