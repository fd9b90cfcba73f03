use crate::core::transaction::{Alert, Transaction};

/// Append-only record of executed payments plus the derived alert feed.
///
/// The alert feed is a subsequence of the transactions: every flagged
/// transaction is copied in at append time, so it stays readable on its own
/// even after the transaction list is cleared. Both collections keep
/// insertion order; the listing surface reverses transactions on read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryStore {
    transactions: Vec<Transaction>,
    alerts: Vec<Alert>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed transaction. Flagged transactions also land in the
    /// alert feed as an independent copy.
    pub fn append(&mut self, transaction: Transaction) {
        if transaction.is_flagged() {
            self.alerts.push(Alert::from(&transaction));
        }
        self.transactions.push(transaction);
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions newest first, the order the listing surface exposes.
    pub fn newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    /// Alerts in insertion order.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// The trailing `n` transactions in insertion order, fewer if history is
    /// shorter.
    pub fn trailing(&self, n: usize) -> &[Transaction] {
        &self.transactions[self.transactions.len().saturating_sub(n)..]
    }

    /// Drop both collections. Used by reset and the demo initializer.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.alerts.clear();
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
