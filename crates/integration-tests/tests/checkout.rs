//! Checkout orchestration against the in-memory store.
//!
//! Covers the transactional contract: all-or-nothing writes, validation
//! before any session is opened, and sessions released on every exit path.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use eco_friendly_core::{Decimal, UserId};
use eco_friendly_integration_tests::{FailPoint, MemoryStore};
use eco_friendly_server::services::{
    CheckoutError, CheckoutRequest, CheckoutService, InvalidCheckout,
};

fn address() -> Value {
    json!({
        "fullName": "Sam Buyer",
        "address1": "4 Orchard Lane",
        "town": "Bristol",
        "postcode": "BS1 4DJ"
    })
}

fn request(body: Value) -> CheckoutRequest {
    serde_json::from_value(body).unwrap()
}

fn request_for(user_id: i32) -> CheckoutRequest {
    request(json!({ "user_id": user_id, "shipping_address": address() }))
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Buyer 42 with (product 1, qty 2, 5.00) and (product 2, qty 1, 10.00).
async fn scenario_store() -> MemoryStore {
    let store = MemoryStore::new();
    let soap = store.add_product("5.00").await;
    let bottle = store.add_product("10.00").await;
    store.add_cart_line(UserId::new(42), soap, 2).await;
    store.add_cart_line(UserId::new(42), bottle, 1).await;
    store
}

// ============================================================================
// Successful checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_scenario_totals_and_clears_cart() {
    let store = scenario_store().await;
    let service = CheckoutService::new(store.clone());

    let receipt = service.checkout(request_for(42)).await.unwrap();

    assert_eq!(receipt.total_cost, dec("20.00"));
    assert_eq!(receipt.line_count, 2);

    let tables = store.snapshot().await;
    assert_eq!(tables.orders.len(), 1);
    let order = tables.orders.get(&receipt.order_id).unwrap();
    assert_eq!(order.user_id, UserId::new(42));
    assert_eq!(order.total_cost, dec("20.00"));
    assert_eq!(order.shipping_address.town(), "Bristol");
    assert_eq!(order.shipping_address.country(), "United Kingdom");

    assert_eq!(tables.order_lines.len(), 2);
    assert!(tables.order_lines.iter().all(|l| l.order_id == receipt.order_id));
    assert!(tables.cart_for(UserId::new(42)).is_empty());

    assert_eq!(store.commits(), 1);
    assert_eq!(store.rollbacks(), 0);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn test_checkout_accepts_string_user_id() {
    let store = scenario_store().await;
    let service = CheckoutService::new(store.clone());

    let receipt = service
        .checkout(request(json!({ "user_id": "42", "shipping_address": address() })))
        .await
        .unwrap();

    assert_eq!(receipt.total_cost, dec("20.00"));
}

#[tokio::test]
async fn test_checkout_leaves_other_buyers_untouched() {
    let store = scenario_store().await;
    let other_product = store.add_product("3.50").await;
    store.add_cart_line(UserId::new(7), other_product, 4).await;
    let service = CheckoutService::new(store.clone());

    service.checkout(request_for(42)).await.unwrap();

    let tables = store.snapshot().await;
    let remaining = tables.cart_for(UserId::new(7));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.first().unwrap().quantity.get(), 4);
}

#[tokio::test]
async fn test_one_order_line_per_cart_line_even_for_same_product() {
    let store = MemoryStore::new();
    let product = store.add_product("2.25").await;
    store.add_cart_line(UserId::new(3), product, 1).await;
    store.add_cart_line(UserId::new(3), product, 3).await;
    let service = CheckoutService::new(store.clone());

    let receipt = service.checkout(request_for(3)).await.unwrap();

    assert_eq!(receipt.total_cost, dec("9.00"));
    assert_eq!(store.snapshot().await.order_lines.len(), 2);
}

// ============================================================================
// Rejected before the database
// ============================================================================

#[tokio::test]
async fn test_missing_user_id_opens_no_session() {
    let store = scenario_store().await;
    let service = CheckoutService::new(store.clone());

    let err = service
        .checkout(request(json!({ "shipping_address": address() })))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::InvalidRequest(InvalidCheckout::MissingBuyer)
    ));
    assert_eq!(store.begins(), 0);
    assert_eq!(store.snapshot().await.cart_for(UserId::new(42)).len(), 2);
}

#[tokio::test]
async fn test_missing_town_opens_no_session() {
    let store = scenario_store().await;
    let service = CheckoutService::new(store.clone());

    let mut shipping = address();
    shipping.as_object_mut().unwrap().remove("town");
    let err = service
        .checkout(request(json!({ "user_id": 42, "shipping_address": shipping })))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::InvalidRequest(InvalidCheckout::IncompleteAddress { field: "town" })
    ));
    assert_eq!(store.begins(), 0);
    assert!(store.snapshot().await.orders.is_empty());
}

// ============================================================================
// Rolled back
// ============================================================================

#[tokio::test]
async fn test_empty_cart_rolls_back_without_writes() {
    let store = scenario_store().await;
    let service = CheckoutService::new(store.clone());

    let err = service.checkout(request_for(99)).await.unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    let tables = store.snapshot().await;
    assert!(tables.orders.is_empty());
    assert!(tables.order_lines.is_empty());
    assert_eq!(store.begins(), 1);
    assert_eq!(store.rollbacks(), 1);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn test_order_line_failure_discards_order() {
    let store = scenario_store().await;
    store.fail_at(FailPoint::InsertOrderLines);
    let service = CheckoutService::new(store.clone());

    let err = service.checkout(request_for(42)).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Persistence(_)));
    assert!(std::error::Error::source(&err).is_some());

    let tables = store.snapshot().await;
    assert!(tables.orders.is_empty());
    assert!(tables.order_lines.is_empty());
    assert_eq!(tables.cart_for(UserId::new(42)).len(), 2);
    assert_eq!(store.rollbacks(), 1);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn test_every_failure_point_leaves_state_unchanged() {
    for point in [
        FailPoint::LoadCart,
        FailPoint::InsertOrder,
        FailPoint::InsertOrderLines,
        FailPoint::ClearCart,
        FailPoint::Commit,
    ] {
        let store = scenario_store().await;
        store.fail_at(point);
        let service = CheckoutService::new(store.clone());

        let err = service.checkout(request_for(42)).await.unwrap_err();

        assert!(
            matches!(err, CheckoutError::Persistence(_)),
            "{point:?}: {err}"
        );
        let tables = store.snapshot().await;
        assert!(tables.orders.is_empty(), "{point:?}");
        assert_eq!(tables.cart_for(UserId::new(42)).len(), 2, "{point:?}");
        assert_eq!(store.commits(), 0, "{point:?}");
        assert_eq!(store.open_sessions(), 0, "{point:?}");
    }
}

#[tokio::test]
async fn test_begin_failure_is_persistence_error() {
    let store = scenario_store().await;
    store.fail_at(FailPoint::Begin);
    let service = CheckoutService::new(store.clone());

    let err = service.checkout(request_for(42)).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Persistence(_)));
    assert_eq!(store.begins(), 0);
}

#[tokio::test]
async fn test_checkout_succeeds_after_failed_attempt() {
    let store = scenario_store().await;
    store.fail_at(FailPoint::InsertOrder);
    let service = CheckoutService::new(store.clone());

    assert!(service.checkout(request_for(42)).await.is_err());
    let receipt = service.checkout(request_for(42)).await.unwrap();

    assert_eq!(receipt.total_cost, dec("20.00"));
    assert_eq!(store.snapshot().await.orders.len(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkouts_for_same_buyer_bill_once() {
    let store = scenario_store().await;
    let service = std::sync::Arc::new(CheckoutService::new(store.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = std::sync::Arc::clone(&service);
            tokio::spawn(async move { service.checkout(request_for(42)).await })
        })
        .collect();

    let mut placed = 0;
    let mut empty = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(receipt) => {
                assert_eq!(receipt.total_cost, dec("20.00"));
                placed += 1;
            }
            Err(CheckoutError::EmptyCart) => empty += 1,
            Err(other) => panic!("unexpected checkout error: {other}"),
        }
    }

    assert_eq!(placed, 1);
    assert_eq!(empty, 3);
    let tables = store.snapshot().await;
    assert_eq!(tables.orders.len(), 1);
    assert_eq!(tables.order_lines.len(), 2);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkouts_for_different_buyers() {
    let store = MemoryStore::new();
    let product = store.add_product("1.10").await;
    for buyer in 1..=8 {
        store.add_cart_line(UserId::new(buyer), product, i64::from(buyer)).await;
    }
    let service = std::sync::Arc::new(CheckoutService::new(store.clone()));

    let handles: Vec<_> = (1..=8)
        .map(|buyer| {
            let service = std::sync::Arc::clone(&service);
            tokio::spawn(async move { service.checkout(request_for(buyer)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let tables = store.snapshot().await;
    assert_eq!(tables.orders.len(), 8);
    assert!(tables.cart.is_empty());
    let billed: Decimal = tables.orders.values().map(|o| o.total_cost).sum();
    assert_eq!(billed, dec("39.60"));
}
