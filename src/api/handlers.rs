//! API request handlers.

use super::{responses::*, ApiError, AppState};
use crate::core::user::User;
use crate::engine::processor::{PaymentProcessor, PaymentRequest};
use crate::forecast::demand::DemandForecast;
use axum::extract::State;
use axum::response::{Html, Json};
use serde::Deserialize;

/// Landing page listing the available endpoints.
pub async fn index() -> Html<&'static str> {
    Html(
        "<h1>Bridge Engine Online</h1>\n\
         <p>Endpoints available:</p>\n\
         <ul>\n\
           <li><a href=\"/pools\">/pools</a></li>\n\
           <li><a href=\"/transactions\">/transactions</a></li>\n\
           <li><a href=\"/users\">/users</a></li>\n\
         </ul>",
    )
}

/// Pool snapshot plus the demand forecast and the static rate table.
pub async fn get_pools(State(state): State<AppState>) -> Json<PoolsResponse> {
    let bridge = state.bridge.read().await;
    let forecast = DemandForecast::from_history(bridge.history(), bridge.pools());
    Json(PoolsResponse {
        current: bridge.pools().clone(),
        prediction: forecast.points,
        rates: bridge.rates().clone(),
    })
}

/// The user roster with current trust scores.
pub async fn get_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let bridge = state.bridge.read().await;
    Json(bridge.users().to_vec())
}

/// Transactions newest first, plus the alert feed.
pub async fn get_transactions(State(state): State<AppState>) -> Json<TransactionsResponse> {
    let bridge = state.bridge.read().await;
    Json(TransactionsResponse {
        transactions: bridge.history().newest_first().cloned().collect(),
        fraud_alerts: bridge.history().alerts().to_vec(),
    })
}

/// Execute a payment.
pub async fn post_pay(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PayResponse>, ApiError> {
    let mut bridge = state.bridge.write().await;
    let receipt = PaymentProcessor::process(&mut bridge, &request)?;
    Ok(Json(PayResponse {
        success: true,
        transaction: receipt.transaction,
        new_trust_score: receipt.new_trust_score,
    }))
}

/// Restore pools, users, and history to seed values. Refused when the
/// deployment is locked.
pub async fn get_reset(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    if state.locked {
        return Err(ApiError::ResetDisabled);
    }
    let mut bridge = state.bridge.write().await;
    bridge.reset();
    log::info!("state reset to seed");
    Ok(Json(MessageResponse {
        message: "Reset successful".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DemoTriggerRequest {
    pub step: String,
}

/// Demo orchestration. The `init` step reseeds pools and drops history but
/// keeps trust scores; any other step is acknowledged and ignored.
pub async fn post_demo_trigger(
    State(state): State<AppState>,
    Json(request): Json<DemoTriggerRequest>,
) -> Json<TriggerResponse> {
    if request.step == "init" {
        let mut bridge = state.bridge.write().await;
        bridge.clear_activity();
        log::info!("demo initialized");
        return Json(TriggerResponse {
            msg: "Demo Initialized".to_string(),
        });
    }
    Json(TriggerResponse {
        msg: "Step unknown".to_string(),
    })
}
