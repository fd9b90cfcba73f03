//! API response types.

use crate::core::currency::RateTable;
use crate::core::pool::PoolLedger;
use crate::core::transaction::{Alert, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response for the pool snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsResponse {
    pub current: PoolLedger,
    /// Ten-point linear demand forecast for the fiat pool.
    pub prediction: Vec<Decimal>,
    pub rates: RateTable,
}

/// Response for the transaction listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    /// Insertion order.
    #[serde(rename = "fraudAlerts")]
    pub fraud_alerts: Vec<Alert>,
}

/// Response for a successful payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayResponse {
    pub success: bool,
    pub transaction: Transaction,
    pub new_trust_score: i64,
}

/// Confirmation message for reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgment for demo trigger steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub msg: String,
}

/// Error body for client-visible failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
