//! Fiat pool demand forecasting.

pub mod demand;
