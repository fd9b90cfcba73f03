use crate::core::pool::Pool;
use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Currency code such as "BTC", "USD" or "INR".
///
/// Settlement users are seeded with one of the three known codes, but the
/// type accepts arbitrary identifiers: a payment request carrying an unknown
/// code is not an error, it simply routes through the identity-passthrough
/// arm of [`RateTable::route`].
///
/// # Examples
///
/// ```
/// use bridge_engine::core::currency::CurrencyCode;
///
/// let btc = CurrencyCode::new("BTC");
/// let inr = CurrencyCode::new("INR");
/// assert_ne!(btc, inr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Outcome of routing one payment through the bridge.
///
/// Carries the converted receiver amount, the rate that was applied, and the
/// reserve movements the ledger must absorb. A passthrough conversion has
/// `exchange_rate == 1` and no pool deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub receiver_amount: Decimal,
    pub exchange_rate: Decimal,
    pub pool_deltas: BTreeMap<Pool, Decimal>,
}

/// Fixed exchange-rate table for the bridge corridors.
///
/// Rates are set once at startup and never change for the lifetime of the
/// process. Only direct rates are stored, with no inverse derivation:
/// routing recognizes exactly two corridors (BTC→INR and USD→INR) and
/// everything else passes through at par.
///
/// # Examples
///
/// ```
/// use bridge_engine::core::currency::{CurrencyCode, RateTable};
/// use rust_decimal_macros::dec;
///
/// let rates = RateTable::seed();
/// let conversion = rates.route(
///     &CurrencyCode::new("USD"),
///     &CurrencyCode::new("INR"),
///     dec!(100),
/// );
/// assert_eq!(conversion.receiver_amount, dec!(8300));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    /// Direct rates: (from, to) -> rate.
    rates: BTreeMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table every process starts from: the two routable corridors plus
    /// the BTC→USD reference rate, which is reported to callers but takes no
    /// part in routing.
    pub fn seed() -> Self {
        Self::new()
            .with_rate("BTC", "INR", Decimal::from(5_000_000))
            .with_rate("USD", "INR", Decimal::from(83))
            .with_rate("BTC", "USD", Decimal::from(60_000))
    }

    /// Add a direct rate: 1 unit of `from` = `rate` units of `to`.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not positive.
    pub fn with_rate(
        mut self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
        rate: Decimal,
    ) -> Self {
        assert!(
            rate > Decimal::ZERO,
            "exchange rate must be positive, got {}",
            rate
        );
        self.rates.insert((from.into(), to.into()), rate);
        self
    }

    /// Direct rate from one currency to another, if one is configured.
    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(&(from.clone(), to.clone())).copied()
    }

    /// Route a payment from the sender's currency into the receiver's.
    ///
    /// Two corridors convert and move reserves:
    /// - BTC→INR: the crypto pool gains the sent amount, the fiat pool
    ///   funds the payout.
    /// - USD→INR: the stablecoin pool gains the sent amount, the fiat pool
    ///   funds the payout.
    ///
    /// Every other sender/receiver combination — same currency, unknown
    /// codes, INR outbound — is an identity passthrough: the receiver gets
    /// the sent amount unchanged at rate 1 and no reserves move. The
    /// passthrough arm is part of the contract, not an error path.
    pub fn route(
        &self,
        sender: &CurrencyCode,
        receiver: &CurrencyCode,
        amount: Decimal,
    ) -> Conversion {
        let source_pool = match (sender.as_str(), receiver.as_str()) {
            ("BTC", "INR") => Some(Pool::Crypto),
            ("USD", "INR") => Some(Pool::Stablecoin),
            _ => None,
        };

        match (source_pool, self.rate(sender, receiver)) {
            (Some(source), Some(rate)) => {
                let receiver_amount = amount * rate;
                let mut pool_deltas = BTreeMap::new();
                pool_deltas.insert(source, amount);
                pool_deltas.insert(Pool::Fiat, -receiver_amount);
                Conversion {
                    receiver_amount,
                    exchange_rate: rate,
                    pool_deltas,
                }
            }
            _ => Conversion {
                receiver_amount: amount,
                exchange_rate: Decimal::ONE,
                pool_deltas: BTreeMap::new(),
            },
        }
    }

    /// All configured rates in `(from, to, rate)` form.
    pub fn pairs(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyCode, Decimal)> {
        self.rates.iter().map(|((from, to), &rate)| (from, to, rate))
    }
}

// Rates go over the wire as a flat `{"BTC_TO_INR": 5000000, ...}` object.
impl Serialize for RateTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rates.len()))?;
        for ((from, to), rate) in &self.rates {
            map.serialize_entry(&format!("{}_TO_{}", from, to), rate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = RateTable;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with \"FROM_TO_TO\" keys")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut rates = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, Decimal>()? {
                    let (from, to) = key
                        .split_once("_TO_")
                        .ok_or_else(|| de::Error::custom(format!("invalid rate key: {key}")))?;
                    rates.insert((CurrencyCode::new(from), CurrencyCode::new(to)), value);
                }
                Ok(RateTable { rates })
            }
        }
        deserializer.deserialize_map(V)
    }
}
