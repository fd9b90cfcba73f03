use crate::core::currency::RateTable;
use crate::core::pool::PoolLedger;
use crate::core::user::{User, UserId};
use crate::engine::history::HistoryStore;
use chrono::{DateTime, Utc};

/// The complete mutable state of the bridge: pools, rate table, user
/// roster, and history.
///
/// Every operation takes the whole aggregate, so one synchronization point
/// around it is enough to make each payment atomic with respect to the
/// next. Nothing in here does its own locking.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeState {
    pub(crate) pools: PoolLedger,
    pub(crate) rates: RateTable,
    pub(crate) users: Vec<User>,
    pub(crate) history: HistoryStore,
    /// Monotonic per-process counter folded into transaction ids so two
    /// payments in the same millisecond still get distinct, ordered ids.
    tx_seq: u64,
}

impl BridgeState {
    /// Fresh state from the fixed seed data: three pools, three rates,
    /// three users, empty history.
    pub fn seed() -> Self {
        Self {
            pools: PoolLedger::seed(),
            rates: RateTable::seed(),
            users: User::seed_roster(),
            history: HistoryStore::new(),
            tx_seq: 0,
        }
    }

    /// Restore everything to seed values, id counter included.
    pub fn reset(&mut self) {
        *self = Self::seed();
    }

    /// Demo initializer: reseed pools and drop history, but keep users and
    /// their trust scores where they are. The id counter keeps running.
    pub fn clear_activity(&mut self) {
        self.pools = PoolLedger::seed();
        self.history.clear();
    }

    pub(crate) fn next_transaction_id(&mut self, at: DateTime<Utc>) -> String {
        self.tx_seq += 1;
        format!("tx_{:06}_{}", self.tx_seq, at.timestamp_millis())
    }

    pub fn pools(&self) -> &PoolLedger {
        &self.pools
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub(crate) fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.id == id)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::seed()
    }
}
