use crate::core::currency::CurrencyCode;
use crate::core::transaction::Transaction;
use crate::core::user::UserId;
use crate::engine::fraud::FraudEvaluator;
use crate::engine::state::BridgeState;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A payment order as submitted by a caller.
///
/// `amount` and `currency` are accepted as given: a negative amount or an
/// unknown currency code degrades to the identity-passthrough conversion
/// rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub from_id: UserId,
    pub to_id: UserId,
    pub amount: Decimal,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub geo_risk: bool,
}

/// Outcome of a successful payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub transaction: Transaction,
    /// Sender's trust score after the fraud verdict was applied.
    pub new_trust_score: i64,
}

/// Errors a payment can signal. Resolving both party ids is the only
/// validation in the engine.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

/// Executes payments against a [`BridgeState`].
///
/// One call is one atomic unit: callers serialize access to the state, and
/// the processor never leaves it half-mutated (both users are resolved
/// before the first write).
pub struct PaymentProcessor;

impl PaymentProcessor {
    /// Process a payment stamped with the current wall-clock time.
    pub fn process(
        state: &mut BridgeState,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, EngineError> {
        Self::process_at(state, request, Utc::now())
    }

    /// Process a payment stamped with an explicit time. Tests use this to
    /// drive the velocity window deterministically.
    ///
    /// # Algorithm
    ///
    /// 1. Resolve sender and receiver; fail before any mutation if either
    ///    is unknown.
    /// 2. Route the amount through the rate table to get the receiver
    ///    amount, rate, and pool deltas, and apply the deltas.
    /// 3. Build the transaction record and run the fraud evaluator against
    ///    it, the full prior history, and the post-mutation pools.
    /// 4. Apply the verdict's trust delta to the sender (clamped) and
    ///    append the finished record to history.
    pub fn process_at(
        state: &mut BridgeState,
        request: &PaymentRequest,
        at: DateTime<Utc>,
    ) -> Result<PaymentReceipt, EngineError> {
        if state.user(&request.from_id).is_none() {
            return Err(EngineError::UserNotFound(request.from_id.clone()));
        }
        let receiver_currency = state
            .user(&request.to_id)
            .ok_or_else(|| EngineError::UserNotFound(request.to_id.clone()))?
            .settlement_currency
            .clone();

        let conversion = state
            .rates
            .route(&request.currency, &receiver_currency, request.amount);
        for (&pool, &delta) in &conversion.pool_deltas {
            state.pools.apply_delta(pool, delta);
        }

        let mut transaction = Transaction {
            id: state.next_transaction_id(at),
            created_at: at,
            sender_id: request.from_id.clone(),
            receiver_id: request.to_id.clone(),
            sender_currency: request.currency.clone(),
            receiver_currency,
            sender_amount: request.amount,
            receiver_amount: conversion.receiver_amount,
            exchange_rate: conversion.exchange_rate,
            pool_deltas: conversion.pool_deltas,
            geo_risk_flag: request.geo_risk,
            fraud_flags: vec![],
            trust_delta: 0,
        };

        let verdict = FraudEvaluator::evaluate(
            &transaction,
            state.history.transactions(),
            &state.pools,
            &state.rates,
        );
        transaction.fraud_flags = verdict.flags;
        transaction.trust_delta = verdict.trust_delta;

        let sender = state
            .user_mut(&request.from_id)
            .ok_or_else(|| EngineError::UserNotFound(request.from_id.clone()))?;
        let new_trust_score = sender.adjust_trust(verdict.trust_delta);

        if transaction.is_flagged() {
            log::warn!(
                "{} flagged {:?}, sender trust now {}",
                transaction.id,
                transaction.fraud_flags,
                new_trust_score
            );
        }

        state.history.append(transaction.clone());

        Ok(PaymentReceipt {
            transaction,
            new_trust_score,
        })
    }
}
