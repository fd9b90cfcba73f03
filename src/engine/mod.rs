//! Payment execution: fraud screening, history, and the state aggregate
//! every operation runs against.

pub mod fraud;
pub mod history;
pub mod processor;
pub mod state;
