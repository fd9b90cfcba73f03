//! Fraud rule walkthrough: high value, velocity, geo mismatch, stacking.
//!
//! Runs each rule against a fresh seed state with a fixed clock so the
//! output is reproducible.

use bridge_engine::core::currency::CurrencyCode;
use bridge_engine::core::pool::Pool;
use bridge_engine::core::user::UserId;
use bridge_engine::engine::fraud::HIGH_VALUE_POOL_FRACTION;
use bridge_engine::engine::processor::{PaymentProcessor, PaymentReceipt, PaymentRequest};
use bridge_engine::engine::state::BridgeState;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn pay_at(
    state: &mut BridgeState,
    at: DateTime<Utc>,
    from: &str,
    amount: Decimal,
    currency: &str,
    geo_risk: bool,
) -> PaymentReceipt {
    let request = PaymentRequest {
        from_id: UserId::new(from),
        to_id: UserId::new("bob"),
        amount,
        currency: CurrencyCode::new(currency),
        geo_risk,
    };
    PaymentProcessor::process_at(state, &request, at).unwrap()
}

fn describe(receipt: &PaymentReceipt) {
    let flags: Vec<String> = receipt
        .transaction
        .fraud_flags
        .iter()
        .map(|f| f.to_string())
        .collect();
    let flags = if flags.is_empty() {
        "clean".to_string()
    } else {
        flags.join(", ")
    };
    println!(
        "  {:<14} delta {:>3}  trust -> {:<3}  [{}]",
        receipt.transaction.receiver_amount,
        receipt.transaction.trust_delta,
        receipt.new_trust_score,
        flags
    );
}

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  bridge-engine: Fraud Rule Scenarios      ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let base = Utc.timestamp_millis_opt(1_755_000_000_000).unwrap();

    // --- Scenario 1: high value ---
    println!("━━━ Scenario 1: High Value ━━━\n");
    let mut state = BridgeState::seed();
    let receipt = pay_at(&mut state, base, "alice", dec!(0.01), "BTC", false);

    let fiat_after = state.pools().balance(Pool::Fiat);
    println!(
        "  0.01 BTC pays out 50,000 INR; the fiat pool lands at {} and",
        fiat_after
    );
    println!(
        "  the threshold is {} x {} = {}.\n",
        HIGH_VALUE_POOL_FRACTION,
        fiat_after,
        fiat_after * HIGH_VALUE_POOL_FRACTION
    );
    describe(&receipt);
    println!();

    // --- Scenario 2: velocity ---
    println!("━━━ Scenario 2: Velocity ━━━\n");
    println!("  Four payments inside one minute. The fourth sees three prior");
    println!("  transactions in the window and trips the limit.\n");
    let mut state = BridgeState::seed();
    for i in 0..4 {
        let at = base + Duration::milliseconds(i * 10_000);
        let receipt = pay_at(&mut state, at, "alice", dec!(10), "INR", false);
        describe(&receipt);
    }
    println!();

    // --- Scenario 3: geo mismatch ---
    println!("━━━ Scenario 3: Geo Mismatch ━━━\n");
    let mut state = BridgeState::seed();
    let receipt = pay_at(&mut state, base, "charlie", dec!(10), "INR", true);
    describe(&receipt);
    println!();

    // --- Scenario 4: stacked flags ---
    println!("━━━ Scenario 4: Stacking (last rule wins) ━━━\n");
    println!("  A payment can trip several rules, but only the last rule's");
    println!("  trust delta is applied.\n");
    let mut state = BridgeState::seed();
    for i in 0..3 {
        let at = base + Duration::milliseconds(i * 5_000);
        pay_at(&mut state, at, "alice", dec!(10), "INR", false);
    }
    // High value + velocity + geo, all on one payment.
    let receipt = pay_at(
        &mut state,
        base + Duration::milliseconds(20_000),
        "alice",
        dec!(30_000),
        "INR",
        true,
    );
    describe(&receipt);
    println!();

    // --- Alert feed ---
    println!("━━━ Alert Feed ━━━\n");
    for alert in state.history().alerts() {
        let flags: Vec<String> = alert.flags.iter().map(|f| f.to_string()).collect();
        println!("  {}  [{}]", alert.transaction.id, flags.join(", "));
    }

    println!("\n━━━ Interpretation ━━━\n");
    println!("  Flags are advisory: every payment above settles in full. The");
    println!("  trust score is the only lasting penalty, and it is clamped to");
    println!("  the 0..=100 band.");
}
