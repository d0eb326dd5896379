mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use common::{FlakyStore, harness, login, rice};
use goodwin_storefront::{
    config::AppConfig,
    dto::{
        cart::AddToCartRequest,
        orders::CheckoutRequest,
        products::UpsertProductRequest,
    },
    error::AppError,
    models::{BagSize, OrderStatus},
    services::{
        admin_service, cart_service,
        order_service::{self, EMPTY_CART, MISSING_FIELDS, build_order_id},
    },
    state::AppState,
    storage::{CART_KEY, LocalStorage, MemoryStorage},
    store::DocumentStore,
};

fn add(product_id: i64, size: BagSize) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        size: Some(size),
    }
}

fn customer() -> CheckoutRequest {
    CheckoutRequest {
        customer_name: "Nimal Perera".into(),
        phone: "0771234567".into(),
        address: "12 Temple Road".into(),
        city: "Kandy".into(),
        delivery_notes: "Call before delivery".into(),
    }
}

#[tokio::test]
async fn checkout_saves_order_decrements_stock_and_clears_cart() -> anyhow::Result<()> {
    let h = harness(vec![
        rice(1, "Keeri Samba", "Samba", 1000, 5),
        rice(2, "Nadu", "Raw", 5200, 1),
    ])
    .await?;
    cart_service::add_to_cart(&h.state, add(1, BagSize::Kg5)).await?;
    cart_service::add_to_cart(&h.state, add(1, BagSize::Kg5)).await?;
    cart_service::add_to_cart(&h.state, add(1, BagSize::Kg25)).await?;
    cart_service::add_to_cart(&h.state, add(2, BagSize::Kg10)).await?;

    let resp = order_service::checkout(&h.state, customer()).await?;
    let placed = resp.data.expect("checkout data");
    assert_eq!(
        resp.message,
        format!("Order #{} placed successfully!", placed.order.id)
    );
    assert_eq!(placed.order.total, 2 * 200 + 1000 + 2080);
    assert_eq!(placed.order.items.len(), 3);
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert!(placed.order.id.starts_with("ORD"));
    assert!(placed.whatsapp_url.starts_with("https://wa.me/94756272858?text="));

    let products = h.store.list_products().await?;
    assert_eq!(products[0].stock, 2);
    assert_eq!(products[1].stock, 0);

    let orders = h.store.list_orders().await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].delivery_notes, "Call before delivery");

    assert!(h.state.cart.lock().await.is_empty());
    assert_eq!(h.local.get(CART_KEY).await?.as_deref(), Some("[]"));
    Ok(())
}

#[tokio::test]
async fn order_total_is_a_snapshot() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Basmati Premium", "Basmati", 12500, 10)]).await?;
    cart_service::add_to_cart(&h.state, add(1, BagSize::Kg25)).await?;
    order_service::checkout(&h.state, customer()).await?;
    h.state.resync().await?;

    let admin = login(&h.state).await?;
    admin_service::update_product(
        &h.state,
        &admin,
        1,
        UpsertProductRequest {
            name: Some("Basmati Premium".into()),
            product_type: Some("Basmati".into()),
            price: Some(15000),
            stock: Some(9),
            visible: true,
            image: None,
        },
    )
    .await?;
    h.state.resync().await?;

    let orders = h.state.orders().await;
    assert_eq!(orders[0].total, 12500);
    assert_eq!(orders[0].items[0].price, 12500);
    assert_eq!(h.state.products().await[0].price, 15000);
    Ok(())
}

#[tokio::test]
async fn empty_cart_checkout_writes_nothing() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Nadu", "Raw", 5200, 10)]).await?;

    let err = order_service::checkout(&h.state, customer()).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == EMPTY_CART));
    assert_eq!(h.store.writes(), 0);
    Ok(())
}

#[tokio::test]
async fn blank_delivery_field_is_rejected_before_any_write() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Nadu", "Raw", 5200, 10)]).await?;
    cart_service::add_to_cart(&h.state, add(1, BagSize::Kg5)).await?;

    let request = CheckoutRequest {
        city: "   ".into(),
        ..customer()
    };
    let err = order_service::checkout(&h.state, request).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == MISSING_FIELDS));
    assert_eq!(h.store.writes(), 0);
    assert_eq!(h.state.cart.lock().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_order_write_skips_stock_and_keeps_cart() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::new(vec![rice(1, "Nadu", "Raw", 5200, 10)]));
    store.fail_orders.store(true, Ordering::SeqCst);
    let local = Arc::new(MemoryStorage::new());
    let state = AppState::new(AppConfig::default(), store.clone(), local.clone()).await?;
    cart_service::add_to_cart(&state, add(1, BagSize::Kg25)).await?;

    let err = order_service::checkout(&state, customer()).await.unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));
    assert_eq!(store.stock_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.list_products().await?[0].stock, 10);
    assert!(store.list_orders().await?.is_empty());
    assert_eq!(state.cart.lock().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn stock_failure_midway_leaves_earlier_writes_in_place() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::new(vec![
        rice(1, "Nadu", "Raw", 5200, 10),
        rice(2, "Red Kekulu", "Red", 5400, 10),
    ]));
    store.stock_budget.store(1, Ordering::SeqCst);
    let local = Arc::new(MemoryStorage::new());
    let state = AppState::new(AppConfig::default(), store.clone(), local.clone()).await?;
    cart_service::add_to_cart(&state, add(1, BagSize::Kg25)).await?;
    cart_service::add_to_cart(&state, add(2, BagSize::Kg25)).await?;

    let err = order_service::checkout(&state, customer()).await.unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));

    assert_eq!(store.list_orders().await?.len(), 1);
    let products = store.list_products().await?;
    assert_eq!(products[0].stock, 9);
    assert_eq!(products[1].stock, 10);
    assert_eq!(state.cart.lock().await.len(), 2);
    Ok(())
}

#[test]
fn order_id_uses_last_six_millisecond_digits() {
    let now = DateTime::from_timestamp_millis(1_700_000_123_456).expect("valid timestamp");
    assert_eq!(build_order_id(now), "ORD123456");

    let now = DateTime::from_timestamp_millis(1_700_000_000_042).expect("valid timestamp");
    assert_eq!(build_order_id(now), "ORD000042");
}
