//! Core domain types: currencies and routing, liquidity pools, users, and
//! transaction records.

pub mod currency;
pub mod pool;
pub mod transaction;
pub mod user;
