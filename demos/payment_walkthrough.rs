//! End-to-end payment walkthrough across the three corridors.
//!
//! Demonstrates conversion, pool rebalancing, trust accrual and the
//! demand forecast after a short settled session.

use bridge_engine::core::currency::CurrencyCode;
use bridge_engine::core::pool::Pool;
use bridge_engine::core::user::UserId;
use bridge_engine::engine::processor::{PaymentProcessor, PaymentRequest};
use bridge_engine::engine::state::BridgeState;
use bridge_engine::forecast::demand::DemandForecast;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

fn print_pools(state: &BridgeState) {
    for pool in [Pool::Fiat, Pool::Crypto, Pool::Stablecoin] {
        println!("  {:<12} {:>14}", pool, state.pools().balance(pool));
    }
    println!();
}

fn pay(
    state: &mut BridgeState,
    at: DateTime<Utc>,
    from: &str,
    to: &str,
    amount: rust_decimal::Decimal,
    currency: &str,
) {
    let request = PaymentRequest {
        from_id: UserId::new(from),
        to_id: UserId::new(to),
        amount,
        currency: CurrencyCode::new(currency),
        geo_risk: false,
    };
    let receipt = PaymentProcessor::process_at(state, &request, at).unwrap();

    println!("  {}", receipt.transaction);
    println!("  trust[{}] -> {}", from, receipt.new_trust_score);
    println!();
}

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  bridge-engine: Payment Walkthrough       ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let mut state = BridgeState::seed();
    let base = Utc.timestamp_millis_opt(1_755_000_000_000).unwrap();

    println!("━━━ Seed Pools ━━━\n");
    print_pools(&state);

    // --- Scenario 1: BTC corridor ---
    println!("━━━ Scenario 1: BTC → INR Corridor ━━━\n");
    println!("  Alice settles in BTC; Bob is an INR merchant. The bridge");
    println!("  absorbs the BTC into the crypto pool and pays Bob from fiat.\n");
    pay(&mut state, base, "alice", "bob", dec!(0.004), "BTC");
    print_pools(&state);

    // --- Scenario 2: USD corridor ---
    println!("━━━ Scenario 2: USD → INR Corridor ━━━\n");
    pay(
        &mut state,
        base + Duration::milliseconds(70_000),
        "charlie",
        "bob",
        dec!(100),
        "USD",
    );
    print_pools(&state);

    // --- Scenario 3: unrecognized pair passes through ---
    println!("━━━ Scenario 3: Passthrough (INR → BTC settler) ━━━\n");
    println!("  No INR_TO_BTC rate is listed, so the amount passes through");
    println!("  at rate 1 and no pool moves.\n");
    pay(
        &mut state,
        base + Duration::milliseconds(140_000),
        "bob",
        "alice",
        dec!(250),
        "INR",
    );
    print_pools(&state);

    // --- Forecast ---
    println!("━━━ Fiat Demand Forecast ━━━\n");
    let forecast = DemandForecast::from_history(state.history(), state.pools());
    println!("  {forecast}\n");

    println!("━━━ Interpretation ━━━\n");
    println!("  Both corridor payments drained the fiat pool, so the trend");
    println!("  extrapolates that drain forward. The passthrough leg counts");
    println!("  in the window but contributes nothing, diluting the slope.");
}
