//! # bridge-engine
//!
//! Cross-currency payment bridge simulator.
//!
//! Payments are routed through three shared liquidity pools at fixed
//! exchange rates, screened by a rule-based fraud evaluator that feeds a
//! per-user trust score, and recorded in an append-only history that
//! drives a linear demand forecast for the fiat pool.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies and routing, pools, users, transactions
//! - **engine** — Payment processing, fraud rules, history, the state aggregate
//! - **forecast** — Fiat pool demand projection
//! - **simulation** — Random traffic generation for benchmarks and demos
//! - **api** — HTTP surface (axum)

pub mod api;
pub mod core;
pub mod engine;
pub mod forecast;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{Conversion, CurrencyCode, RateTable};
    pub use crate::core::pool::{Pool, PoolLedger};
    pub use crate::core::transaction::{Alert, FraudFlag, Transaction};
    pub use crate::core::user::{User, UserId};
    pub use crate::engine::processor::{
        EngineError, PaymentProcessor, PaymentReceipt, PaymentRequest,
    };
    pub use crate::engine::state::BridgeState;
    pub use crate::forecast::demand::DemandForecast;
}
