mod common;

use common::{harness, login, rice};
use goodwin_storefront::{
    dto::{
        auth::LoginRequest,
        cart::AddToCartRequest,
        orders::{CheckoutRequest, SelectAllRequest, UpdateOrderStatusRequest},
        products::UpsertProductRequest,
    },
    error::AppError,
    filter::{OrderFilter, ProductFilter},
    middleware::auth::ensure_admin,
    models::{BagSize, MAX_PRICE, OrderStatus},
    services::{admin_service, auth_service, cart_service, catalog_service, order_service},
    state::AppState,
    storage::{ADMIN_SESSION_KEY, LocalStorage},
};

fn form(name: &str, product_type: &str, price: i64, stock: i32) -> UpsertProductRequest {
    UpsertProductRequest {
        name: Some(name.into()),
        product_type: Some(product_type.into()),
        price: Some(price),
        stock: Some(stock),
        visible: true,
        image: None,
    }
}

async fn place_order(state: &AppState, product_id: i64, customer: &str) -> anyhow::Result<String> {
    cart_service::add_to_cart(
        state,
        AddToCartRequest {
            product_id,
            size: Some(BagSize::Kg25),
        },
    )
    .await?;
    let resp = order_service::checkout(
        state,
        CheckoutRequest {
            customer_name: customer.into(),
            phone: "+94 77 123 4567".into(),
            address: "5 Lake Drive".into(),
            city: "Galle".into(),
            delivery_notes: String::new(),
        },
    )
    .await?;
    state.resync().await?;
    // Order ids are millisecond based; keep consecutive orders distinct.
    tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    Ok(resp.data.expect("checkout data").order.id)
}

#[tokio::test]
async fn login_sets_and_logout_clears_the_session_flag() -> anyhow::Result<()> {
    let h = harness(Vec::new()).await?;

    let err = auth_service::login(
        &h.state,
        LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert_eq!(err.to_string(), "Invalid credentials!");
    assert!(matches!(ensure_admin(&h.state).await, Err(AppError::Forbidden)));

    login(&h.state).await?;
    assert_eq!(h.local.get(ADMIN_SESSION_KEY).await?.as_deref(), Some("true"));
    let session = auth_service::session(&h.state).await?;
    assert!(session.data.expect("session").logged_in);

    auth_service::logout(&h.state).await?;
    assert!(h.local.get(ADMIN_SESSION_KEY).await?.is_none());
    assert!(matches!(ensure_admin(&h.state).await, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn created_products_take_the_next_id() -> anyhow::Result<()> {
    let h = harness(vec![
        rice(3, "Nadu", "Raw", 5200, 10),
        rice(8, "Red Kekulu", "Red", 5400, 10),
    ])
    .await?;
    let admin = login(&h.state).await?;

    let created = admin_service::create_product(&h.state, &admin, form("Suduru Samba", "Samba", 7200, 12))
        .await?
        .data
        .expect("product");
    assert_eq!(created.id, 9);
    assert!(created.visible);

    let err = admin_service::create_product(
        &h.state,
        &admin,
        UpsertProductRequest {
            name: Some("  ".into()),
            ..form("", "Samba", 1, 1)
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = admin_service::create_product(&h.state, &admin, form("Suduru Samba", "   ", 7200, 12))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == admin_service::MISSING_PRODUCT_FIELDS));

    let empty = harness(Vec::new()).await?;
    let admin = login(&empty.state).await?;
    let first = admin_service::create_product(&empty.state, &admin, form("Nadu", "Raw", 5200, 1))
        .await?
        .data
        .expect("product");
    assert_eq!(first.id, 1);
    Ok(())
}

#[tokio::test]
async fn product_table_filters_and_visibility() -> anyhow::Result<()> {
    let h = harness(vec![
        rice(1, "Keeri Samba", "Samba", 6500, 40),
        rice(2, "Nadu", "Raw", 5200, 3),
        rice(3, "Basmati Premium", "Basmati", 12500, 5),
        rice(12, "Suduru Samba", "Samba", 7200, 30),
    ])
    .await?;
    let admin = login(&h.state).await?;

    let search = |q: &str, category: &str| ProductFilter {
        q: Some(q.into()),
        category: Some(category.into()),
    };
    let names = |resp: goodwin_storefront::response::ApiResponse<goodwin_storefront::dto::products::ProductList>| {
        resp.data
            .map(|list| list.items.into_iter().map(|p| p.name).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    let found = names(admin_service::list_products(&h.state, &admin, search("SAMBA", "all")).await?);
    assert_eq!(found, vec!["Keeri Samba", "Suduru Samba"]);
    let found = names(admin_service::list_products(&h.state, &admin, search("2", "")).await?);
    assert_eq!(found, vec!["Nadu", "Suduru Samba"]);
    let found = names(admin_service::list_products(&h.state, &admin, search("", "Basmati")).await?);
    assert_eq!(found, vec!["Basmati Premium"]);

    let low = admin_service::list_low_stock(&h.state, &admin).await?;
    let low: Vec<i64> = low.data.expect("low stock").items.iter().map(|p| p.id).collect();
    assert_eq!(low, vec![2, 3]);

    let hidden = admin_service::toggle_visibility(&h.state, &admin, 2).await?;
    assert_eq!(hidden.message, "Product is now hidden");
    h.state.resync().await?;
    let catalog = catalog_service::list_catalog(&h.state).await?;
    let ids: Vec<i64> = catalog.data.expect("catalog").items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 12]);

    admin_service::delete_product(&h.state, &admin, 12).await?;
    h.state.resync().await?;
    assert!(h.state.find_product(12).await.is_none());
    let err = admin_service::delete_product(&h.state, &admin, 12).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == admin_service::INVALID_PRODUCT));
    Ok(())
}

#[tokio::test]
async fn order_status_filter_and_detail_links() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Keeri Samba", "Samba", 6500, 40)]).await?;
    let admin = login(&h.state).await?;
    let first = place_order(&h.state, 1, "Nimal Perera").await?;
    let second = place_order(&h.state, 1, "Kumari Silva").await?;

    let resp = admin_service::update_order_status(
        &h.state,
        &admin,
        &first,
        UpdateOrderStatusRequest {
            status: OrderStatus::Completed,
        },
    )
    .await?;
    assert_eq!(resp.message, "Order status updated!");
    h.state.resync().await?;

    let pending = admin_service::list_orders(
        &h.state,
        &admin,
        OrderFilter {
            status: Some("pending".into()),
        },
    )
    .await?;
    let ids: Vec<String> = pending.data.expect("orders").items.into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.clone()]);

    let all = admin_service::list_orders(&h.state, &admin, OrderFilter::default()).await?;
    assert_eq!(all.meta.and_then(|m| m.total), Some(2));

    let err = admin_service::list_orders(
        &h.state,
        &admin,
        OrderFilter {
            status: Some("shipped".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let detail = admin_service::get_order(&h.state, &admin, &second)
        .await?
        .data
        .expect("detail");
    assert!(detail.whatsapp_url.starts_with("https://wa.me/94771234567?text=Hello%20Kumari%20Silva"));
    assert_eq!(detail.tel_url, "tel:+94 77 123 4567");
    Ok(())
}

#[tokio::test]
async fn bulk_delete_removes_selected_orders() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Keeri Samba", "Samba", 6500, 40)]).await?;
    let admin = login(&h.state).await?;
    let a = place_order(&h.state, 1, "A").await?;
    let b = place_order(&h.state, 1, "B").await?;
    let c = place_order(&h.state, 1, "C").await?;

    admin_service::update_order_status(
        &h.state,
        &admin,
        &c,
        UpdateOrderStatusRequest {
            status: OrderStatus::Cancelled,
        },
    )
    .await?;
    h.state.resync().await?;

    let selection = admin_service::select_all(
        &h.state,
        &admin,
        SelectAllRequest {
            all: true,
            status: Some("pending".into()),
        },
    )
    .await?;
    let mut selected = selection.data.expect("selection").selected;
    selected.sort();
    let mut expected = vec![a.clone(), b.clone()];
    expected.sort();
    assert_eq!(selected, expected);

    admin_service::clear_selection(&h.state, &admin).await?;
    assert!(h.state.selection.lock().await.is_empty());
    admin_service::select_all(
        &h.state,
        &admin,
        SelectAllRequest {
            all: true,
            status: Some("pending".into()),
        },
    )
    .await?;

    let toggled = admin_service::toggle_selection(&h.state, &admin, &b).await?;
    assert_eq!(toggled.data.expect("selection").selected, vec![a.clone()]);

    let resp = admin_service::delete_selected(&h.state, &admin).await?;
    assert_eq!(resp.message, "Orders deleted");
    assert!(h.state.selection.lock().await.is_empty());
    h.state.resync().await?;

    let remaining: Vec<String> = h.state.orders().await.into_iter().map(|o| o.id).collect();
    assert_eq!(remaining.len(), 2);
    assert!(!remaining.contains(&a));

    let err = admin_service::delete_selected(&h.state, &admin).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    admin_service::delete_order(&h.state, &admin, &c).await?;
    h.state.resync().await?;
    assert_eq!(h.state.orders().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn dashboard_totals_track_orders() -> anyhow::Result<()> {
    let h = harness(vec![
        rice(1, "Keeri Samba", "Samba", 6500, 40),
        rice(2, "Nadu", "Raw", 5200, 2),
    ])
    .await?;
    let admin = login(&h.state).await?;
    place_order(&h.state, 1, "A").await?;
    place_order(&h.state, 2, "B").await?;

    let view = admin_service::dashboard(&h.state, &admin).await?.data.expect("dashboard");
    assert_eq!(view.stats.total_products, 2);
    assert_eq!(view.stats.total_orders, 2);
    assert_eq!(view.stats.pending_orders, 2);
    assert_eq!(view.stats.total_sales, 6500 + 5200);
    assert_eq!(view.low_stock.len(), 1);
    assert_eq!(view.low_stock[0].stock, 1);
    assert_eq!(view.recent_orders.len(), 2);
    Ok(())
}

#[tokio::test]
async fn contact_form_builds_business_link() -> anyhow::Result<()> {
    let h = harness(Vec::new()).await?;

    let resp = catalog_service::contact(
        &h.state,
        goodwin_storefront::dto::contact::ContactRequest {
            name: "Ruwan".into(),
            phone: "0711111111".into(),
            message: "Do you deliver to Matara?".into(),
        },
    )
    .await?;
    let link = resp.data.expect("link").whatsapp_url;
    assert!(link.starts_with("https://wa.me/94756272858?text=Hi%20Goodwin%20Traders"));

    let err = catalog_service::contact(
        &h.state,
        goodwin_storefront::dto::contact::ContactRequest {
            name: "Ruwan".into(),
            phone: String::new(),
            message: "Hello".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn prices_above_the_cap_are_refused() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Nadu", "Raw", 5200, 10)]).await?;
    let admin = login(&h.state).await?;

    let err = admin_service::create_product(&h.state, &admin, form("Gold Samba", "Samba", i64::MAX / 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let err = admin_service::update_product(&h.state, &admin, 1, form("Nadu", "Raw", MAX_PRICE + 1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let capped = admin_service::create_product(&h.state, &admin, form("Gold Samba", "Samba", MAX_PRICE, 1))
        .await?
        .data
        .expect("product");
    assert_eq!(capped.price, MAX_PRICE);
    Ok(())
}

#[tokio::test]
async fn catalog_lists_stored_prices_beyond_the_cap() -> anyhow::Result<()> {
    let h = harness(vec![rice(1, "Gold Samba", "Samba", i64::MAX / 2, 3)]).await?;

    let catalog = catalog_service::list_catalog(&h.state).await?;
    assert_eq!(catalog.data.expect("catalog").items.len(), 1);

    cart_service::add_to_cart(
        &h.state,
        AddToCartRequest {
            product_id: 1,
            size: Some(BagSize::Kg25),
        },
    )
    .await?;
    let view = cart_service::adjust_quantity(
        &h.state,
        0,
        goodwin_storefront::dto::cart::AdjustQuantityRequest { delta: 2 },
    )
    .await?
    .data
    .expect("cart view");
    assert_eq!(view.total, i64::MAX);
    Ok(())
}
