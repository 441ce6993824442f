#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Read endpoints return the current ledger
//! - Mutation endpoints update balances and persist
//! - Error mapping: 404 for unknown bills/accounts, 400 for insufficient funds
//! - Stub link-provider endpoints

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use pocketledger::adapters::stub_link_adapter::{PLACEHOLDER_LINK_TOKEN, StubLinkAdapter};
use pocketledger::adapters::web::{AppState, build_router};
use pocketledger::domain::ledger_store::LedgerStore;
use pocketledger::domain::state::LedgerState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use common::*;

fn create_test_app_with(state: LedgerState) -> (Router, Arc<MockSnapshotPort>) {
    let port = Arc::new(MockSnapshotPort::new());
    let ledger = LedgerStore::new(state, port.clone());
    let app = build_router(AppState::new(ledger, Arc::new(StubLinkAdapter)));
    (app, port)
}

fn create_test_app() -> (Router, Arc<MockSnapshotPort>) {
    create_test_app_with(LedgerState::seed())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn state_returns_whole_ledger() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, get("/api/state")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accounts"].as_array().unwrap().len(), 3);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 5);
        assert_eq!(body["bills"][0]["billerId"], "b1");
        assert!(body.get("access_token").is_none());
    }

    #[tokio::test]
    async fn accounts_and_transactions_are_listed() {
        let (app, _port) = create_test_app();
        let (_, accounts) = send(&app, get("/api/accounts")).await;
        assert_eq!(accounts[0]["name"], "Main Checking");
        assert_eq!(accounts[0]["type"], "checking");

        let (_, transactions) = send(&app, get("/api/transactions")).await;
        assert_eq!(transactions[0]["id"], "t1");
    }

    #[tokio::test]
    async fn bills_filter_by_status() {
        let (app, _port) = create_test_app();
        send(&app, post_empty("/api/bill/pay?bill_id=bill1")).await;

        let (_, pending) = send(&app, get("/api/bills?status=pending")).await;
        let pending = pending.as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["id"], "bill2");

        let (_, all) = send(&app, get("/api/bills")).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn budgets_billers_insights_are_listed() {
        let (app, _port) = create_test_app();
        let (_, budgets) = send(&app, get("/api/budgets")).await;
        assert_eq!(budgets.as_array().unwrap().len(), 3);
        let (_, billers) = send(&app, get("/api/billers")).await;
        assert_eq!(billers[1]["autoPay"], true);
        let (_, insights) = send(&app, get("/api/insights")).await;
        assert_eq!(insights[0]["impact"], "medium");
    }

    #[tokio::test]
    async fn profile_reports_metrics() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, get("/api/profile")).await;
        assert_eq!(status, StatusCode::OK);

        let metrics = &body["metrics"];
        assert_eq!(metrics["monthly_income"], 3500.0);
        assert_eq!(metrics["savings_rate_pct"], 60.3);
        assert_eq!(metrics["emergency_runway_months"], 8.6);
        assert_eq!(body["recent_transactions"].as_array().unwrap().len(), 5);
        assert_eq!(body["budgets"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, get("/api/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }
}

mod transaction_tests {
    use super::*;

    #[tokio::test]
    async fn income_raises_checking_balance() {
        let (app, port) = create_test_app();
        let tx = json!({
            "id": "web1",
            "date": "2024-06-01",
            "amount": 100,
            "category": "Gift",
            "description": "Birthday",
            "type": "income"
        });
        let (status, body) = send(&app, post_json("/api/transaction", tx)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Transaction added");
        assert_eq!(body["new_balance"], 4350.75);
        assert_eq!(port.save_count(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_without_saving() {
        let (app, port) = create_test_app();
        let (status, body) = send(&app, post_json("/api/transaction", json!({"id": "x"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("missing field"));
        assert_eq!(port.save_count(), 0);
    }

    #[tokio::test]
    async fn numeric_string_amount_is_accepted() {
        let (app, _port) = create_test_app();
        let tx = json!({
            "id": "web2",
            "date": "2024-06-01",
            "amount": "50.25",
            "category": "Food",
            "description": "Groceries",
            "type": "expense"
        });
        let (status, body) = send(&app, post_json("/api/transaction", tx)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["new_balance"], 4200.5);
    }

    #[tokio::test]
    async fn non_json_body_gets_detail() {
        let (app, _port) = create_test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/transaction")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }
}

mod bill_tests {
    use super::*;

    #[tokio::test]
    async fn pay_bill_via_query_string() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, post_empty("/api/bill/pay?bill_id=bill1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Bill paid successfully");
        assert!(body["transaction_id"].is_string());

        let (_, accounts) = send(&app, get("/api/accounts")).await;
        assert_eq!(accounts[0]["balance"], 4165.75);
    }

    #[tokio::test]
    async fn pay_bill_via_json_body() {
        let (app, _port) = create_test_app();
        let (status, body) =
            send(&app, post_json("/api/bill/pay", json!({"bill_id": "bill2"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Bill paid successfully");
    }

    #[tokio::test]
    async fn paying_twice_reports_already_paid() {
        let (app, port) = create_test_app();
        send(&app, post_empty("/api/bill/pay?bill_id=bill1")).await;
        let (status, body) = send(&app, post_empty("/api/bill/pay?bill_id=bill1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Bill already paid");
        assert!(body.get("transaction_id").is_none());
        assert_eq!(port.save_count(), 1);
    }

    #[tokio::test]
    async fn unknown_bill_is_404() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, post_empty("/api/bill/pay?bill_id=ghost")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("ghost"));
    }

    #[tokio::test]
    async fn missing_bill_id_is_400() {
        let (app, _port) = create_test_app();
        let (status, _) = send(&app, post_empty("/api/bill/pay")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod transfer_tests {
    use super::*;

    #[tokio::test]
    async fn transfer_moves_funds() {
        let (app, _port) = create_test_app_with(small_state());
        let req = json!({"from_account": "checking", "to_account": "savings", "amount": 100});
        let (status, body) = send(&app, post_json("/api/transfer", req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["new_source_balance"], 400.0);
        assert_eq!(body["new_dest_balance"], 300.0);
        assert_eq!(
            body["message"],
            "Transferred $100.0 from Main Checking to Emergency Fund"
        );
    }

    #[tokio::test]
    async fn string_amount_is_coerced() {
        let (app, _port) = create_test_app_with(small_state());
        let req = json!({"from_account": "checking", "to_account": "savings", "amount": "100"});
        let (status, body) = send(&app, post_json("/api/transfer", req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["new_source_balance"], 400.0);
    }

    #[tokio::test]
    async fn unparseable_amount_is_422_with_detail() {
        let (app, port) = create_test_app_with(small_state());
        let req = json!({"from_account": "checking", "to_account": "savings", "amount": "lots"});
        let (status, body) = send(&app, post_json("/api/transfer", req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("invalid amount"));
        assert_eq!(port.save_count(), 0);
    }

    #[tokio::test]
    async fn insufficient_funds_is_400() {
        let (app, port) = create_test_app_with(small_state());
        let req = json!({"from_account": "savings", "to_account": "checking", "amount": 1000});
        let (status, body) = send(&app, post_json("/api/transfer", req)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("Insufficient funds"));
        assert_eq!(port.save_count(), 0);
    }

    #[tokio::test]
    async fn unknown_account_is_404() {
        let (app, _port) = create_test_app_with(small_state());
        let req = json!({"from_account": "offshore", "to_account": "checking", "amount": 1});
        let (status, body) = send(&app, post_json("/api/transfer", req)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Source account 'offshore' not found");
    }
}

mod insight_and_link_tests {
    use super::*;

    #[tokio::test]
    async fn insight_is_added() {
        let (app, _port) = create_test_app();
        let insight = json!({
            "id": "i2",
            "title": "Refinance",
            "content": "Rates dropped.",
            "type": "debt",
            "impact": "high"
        });
        let (status, body) = send(&app, post_json("/api/insight", insight)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Insight added");

        let (_, insights) = send(&app, get("/api/insights")).await;
        assert_eq!(insights[0]["id"], "i2");
    }

    #[tokio::test]
    async fn create_link_token_returns_placeholder() {
        let (app, _port) = create_test_app();
        let (status, body) = send(&app, post_empty("/api/create_link_token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["link_token"], PLACEHOLDER_LINK_TOKEN);
    }

    #[tokio::test]
    async fn set_access_token_stores_fabricated_credentials() {
        let (app, port) = create_test_app();
        let (status, _) = send(
            &app,
            post_json("/api/set_access_token", json!({"public_token": "public-sandbox-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, state) = send(&app, get("/api/state")).await;
        assert!(state["access_token"].as_str().unwrap().starts_with("access-sandbox-"));
        assert!(port.last_saved().unwrap().item_id.is_some());
    }
}
