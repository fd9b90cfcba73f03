//! Traffic generation for exercising the bridge.
//!
//! Produces random payment batches across the seeded corridors. Used by
//! the benchmarks and demo binaries to grow history quickly.

use crate::core::currency::CurrencyCode;
use crate::core::user::User;
use crate::engine::processor::PaymentRequest;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for a random payment batch.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    /// Number of requests to generate.
    pub request_count: usize,
    /// Sender currencies to draw from.
    pub currencies: Vec<CurrencyCode>,
    /// Minimum payment amount.
    pub min_amount: Decimal,
    /// Maximum payment amount.
    pub max_amount: Decimal,
    /// Probability that a request carries the geo-risk marker.
    pub geo_risk_rate: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            request_count: 100,
            currencies: vec![
                CurrencyCode::new("BTC"),
                CurrencyCode::new("USD"),
                CurrencyCode::new("INR"),
            ],
            min_amount: Decimal::ONE,
            max_amount: Decimal::from(1_000),
            geo_risk_rate: 0.05,
        }
    }
}

/// Generate a batch of random payment requests between the given users.
pub fn generate_traffic(config: &TrafficConfig, users: &[User]) -> Vec<PaymentRequest> {
    assert!(users.len() >= 2, "traffic needs at least two users");

    let mut rng = rand::thread_rng();
    let mut requests = Vec::with_capacity(config.request_count);

    for _ in 0..config.request_count {
        let sender_idx = rng.gen_range(0..users.len());
        let mut receiver_idx = rng.gen_range(0..users.len());
        while receiver_idx == sender_idx {
            receiver_idx = rng.gen_range(0..users.len());
        }

        let currency_idx = rng.gen_range(0..config.currencies.len());

        let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(1.0);
        let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(1_000.0);
        let amount_f64 = rng.gen_range(min_f64..max_f64);
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(Decimal::ONE)
            .round_dp(2);

        requests.push(PaymentRequest {
            from_id: users[sender_idx].id.clone(),
            to_id: users[receiver_idx].id.clone(),
            amount,
            currency: config.currencies[currency_idx].clone(),
            geo_risk: rng.gen_bool(config.geo_risk_rate),
        });
    }

    requests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::processor::PaymentProcessor;
    use crate::engine::state::BridgeState;

    #[test]
    fn test_batch_respects_config() {
        let config = TrafficConfig {
            request_count: 50,
            geo_risk_rate: 0.0,
            ..Default::default()
        };
        let requests = generate_traffic(&config, &User::seed_roster());

        assert_eq!(requests.len(), 50);
        for req in &requests {
            assert_ne!(req.from_id, req.to_id);
            assert!(req.amount >= config.min_amount);
            assert!(req.amount <= config.max_amount);
            assert!(!req.geo_risk);
            assert!(config.currencies.contains(&req.currency));
        }
    }

    #[test]
    fn test_geo_risk_rate_one_marks_everything() {
        let config = TrafficConfig {
            request_count: 20,
            geo_risk_rate: 1.0,
            ..Default::default()
        };
        let requests = generate_traffic(&config, &User::seed_roster());
        assert!(requests.iter().all(|r| r.geo_risk));
    }

    #[test]
    fn test_generated_batch_processes_cleanly() {
        let config = TrafficConfig {
            request_count: 30,
            ..Default::default()
        };
        let mut state = BridgeState::seed();
        for req in generate_traffic(&config, &User::seed_roster()) {
            PaymentProcessor::process(&mut state, &req).unwrap();
        }
        assert_eq!(state.history().len(), 30);
    }
}
