//! HTTP request handlers for the web adapter.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::bill::{Bill, Biller};
use crate::domain::budget::Budget;
use crate::domain::insight::FinancialInsight;
use crate::domain::ledger_store::BillPayment;
use crate::domain::profile::FinancialProfile;
use crate::domain::state::LedgerState;
use crate::domain::transaction::{Transaction, deserialize_amount};

use super::{AppState, WebError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionAddedResponse {
    pub message: String,
    pub new_balance: f64,
}

#[derive(Debug, Serialize)]
pub struct PayBillResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub message: String,
    pub new_source_balance: f64,
    pub new_dest_balance: f64,
}

#[derive(Debug, Serialize)]
pub struct LinkTokenResponse {
    pub link_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BillsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayBillQuery {
    pub bill_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PayBillBody {
    pub bill_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct SetAccessTokenRequest {
    pub public_token: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> Result<Json<LedgerState>, WebError> {
    Ok(Json(state.lock()?.state().clone()))
}

pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, WebError> {
    Ok(Json(state.lock()?.accounts().to_vec()))
}

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, WebError> {
    Ok(Json(state.lock()?.transactions().to_vec()))
}

pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, WebError> {
    Ok(Json(state.lock()?.budgets().to_vec()))
}

pub async fn list_billers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Biller>>, WebError> {
    Ok(Json(state.lock()?.billers().to_vec()))
}

pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BillsQuery>,
) -> Result<Json<Vec<Bill>>, WebError> {
    Ok(Json(state.lock()?.bills(query.status.as_deref())))
}

pub async fn list_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FinancialInsight>>, WebError> {
    Ok(Json(state.lock()?.insights().to_vec()))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinancialProfile>, WebError> {
    Ok(Json(state.lock()?.profile()))
}

pub async fn add_transaction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Transaction>, JsonRejection>,
) -> Result<Json<TransactionAddedResponse>, WebError> {
    let Json(tx) = payload?;
    let new_balance = state.lock()?.add_transaction(tx)?;
    Ok(Json(TransactionAddedResponse {
        message: "Transaction added".to_string(),
        new_balance,
    }))
}

/// Accepts the bill id as `?bill_id=` or as a JSON body `{"bill_id": ...}`.
pub async fn pay_bill(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PayBillQuery>,
    body: Bytes,
) -> Result<Json<PayBillResponse>, WebError> {
    let bill_id = match query.bill_id {
        Some(id) => id,
        None if body.is_empty() => return Err(WebError::bad_request("bill_id is required")),
        None => {
            serde_json::from_slice::<PayBillBody>(&body)
                .map_err(|e| WebError::bad_request(format!("invalid request body: {e}")))?
                .bill_id
        }
    };

    let response = match state.lock()?.pay_bill(&bill_id)? {
        BillPayment::AlreadyPaid => PayBillResponse {
            message: "Bill already paid".to_string(),
            transaction_id: None,
        },
        BillPayment::Paid { transaction_id } => PayBillResponse {
            message: "Bill paid successfully".to_string(),
            transaction_id: Some(transaction_id),
        },
    };
    Ok(Json(response))
}

pub async fn add_insight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FinancialInsight>, JsonRejection>,
) -> Result<Json<MessageResponse>, WebError> {
    let Json(insight) = payload?;
    state.lock()?.add_insight(insight)?;
    Ok(MessageResponse::new("Insight added"))
}

pub async fn transfer_funds(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferResponse>, WebError> {
    let Json(req) = payload?;
    let receipt = state
        .lock()?
        .transfer_funds(&req.from_account, &req.to_account, req.amount)?;
    Ok(Json(TransferResponse {
        message: receipt.message(),
        new_source_balance: receipt.new_source_balance,
        new_dest_balance: receipt.new_dest_balance,
    }))
}

pub async fn create_link_token(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LinkTokenResponse>, WebError> {
    let link_token = state.link_provider.create_link_token()?;
    Ok(Json(LinkTokenResponse { link_token }))
}

pub async fn set_access_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SetAccessTokenRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, WebError> {
    let Json(req) = payload?;
    let provider = Arc::clone(&state.link_provider);
    state
        .lock()?
        .link_account(&req.public_token, &*provider)?;
    Ok(MessageResponse::new("Access token stored"))
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not Found")
}
