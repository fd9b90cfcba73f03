use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the three shared liquidity reserves.
///
/// Serialized lowercase (`fiat`, `crypto`, `stablecoin`), which is also the
/// key format used inside a transaction's pool-delta map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Fiat,
    Crypto,
    Stablecoin,
}

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Fiat, Pool::Crypto, Pool::Stablecoin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Fiat => "fiat",
            Pool::Crypto => "crypto",
            Pool::Stablecoin => "stablecoin",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the balance of each liquidity reserve.
///
/// The ledger does bookkeeping, not solvency enforcement: a delta always
/// applies, and balances are allowed to go negative. Payments drain the fiat
/// pool and feed the asset pools; whether the bridge could actually honor
/// the resulting positions is outside the model.
///
/// Mutated only by the payment processor, one payment at a time.
///
/// # Examples
///
/// ```
/// use bridge_engine::core::pool::{Pool, PoolLedger};
/// use rust_decimal_macros::dec;
///
/// let mut pools = PoolLedger::seed();
/// let after = pools.apply_delta(Pool::Fiat, dec!(-50_000));
/// assert_eq!(after, dec!(450_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolLedger {
    /// Pool -> current balance. Negative balances are legal.
    balances: BTreeMap<Pool, Decimal>,
}

impl PoolLedger {
    /// The reserve levels every process starts from.
    pub fn seed() -> Self {
        let mut balances = BTreeMap::new();
        balances.insert(Pool::Fiat, Decimal::from(500_000));
        balances.insert(Pool::Crypto, Decimal::from(10));
        balances.insert(Pool::Stablecoin, Decimal::from(100_000));
        Self { balances }
    }

    /// Add `amount` (possibly negative) to the named pool and return the new
    /// balance. Never fails and never clamps.
    pub fn apply_delta(&mut self, pool: Pool, amount: Decimal) -> Decimal {
        let balance = self.balances.entry(pool).or_insert(Decimal::ZERO);
        *balance += amount;
        *balance
    }

    /// Current balance of a pool.
    pub fn balance(&self, pool: Pool) -> Decimal {
        self.balances.get(&pool).copied().unwrap_or(Decimal::ZERO)
    }

    /// All balances in pool order.
    pub fn balances(&self) -> &BTreeMap<Pool, Decimal> {
        &self.balances
    }
}
