use crate::{
    dto::{
        admin::DashboardView,
        orders::{OrderDetail, OrderList, SelectAllRequest, SelectionView, UpdateOrderStatusRequest},
        products::{ProductList, UpsertProductRequest},
    },
    error::{AppError, AppResult},
    filter::{self, DashboardStats, OrderFilter, ProductFilter},
    messaging::{customer_followup, tel_link, whatsapp_link},
    middleware::auth::AdminSession,
    models::{MAX_PRICE, Order, Product},
    response::{ApiResponse, Meta, Removed},
    state::AppState,
};

pub const MISSING_PRODUCT_FIELDS: &str = "Please fill all required fields";
pub const INVALID_PRODUCT: &str = "Product not found or invalid ID";

pub async fn dashboard(state: &AppState, _admin: &AdminSession) -> AppResult<ApiResponse<DashboardView>> {
    let catalog = state.catalog.read().await;
    let threshold = state.config.low_stock_threshold;
    let data = DashboardView {
        stats: DashboardStats::compute(&catalog.products, &catalog.orders),
        low_stock: filter::low_stock(&catalog.products, threshold)
            .into_iter()
            .cloned()
            .collect(),
        recent_orders: filter::recent_orders(&catalog.orders).to_vec(),
    };
    Ok(ApiResponse::success("Dashboard", data, Some(Meta::empty())))
}

pub async fn list_products(
    state: &AppState,
    _admin: &AdminSession,
    query: ProductFilter,
) -> AppResult<ApiResponse<ProductList>> {
    let catalog = state.catalog.read().await;
    let items: Vec<Product> = query.apply(&catalog.products).into_iter().cloned().collect();
    let message = if items.is_empty() { "No products found" } else { "Products" };
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success(message, ProductList { items }, Some(meta)))
}

pub async fn list_low_stock(state: &AppState, _admin: &AdminSession) -> AppResult<ApiResponse<ProductList>> {
    let catalog = state.catalog.read().await;
    let items: Vec<Product> = filter::low_stock(&catalog.products, state.config.low_stock_threshold)
        .into_iter()
        .cloned()
        .collect();
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("Low stock", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    _admin: &AdminSession,
    payload: UpsertProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let data = payload
        .into_data()
        .ok_or_else(|| AppError::BadRequest(MISSING_PRODUCT_FIELDS.into()))?;
    validate_amounts(data.price, data.stock)?;

    let id = next_product_id(&state.catalog.read().await.products);
    let product = state.store.create_product(id, data).await.map_err(|err| {
        tracing::error!(error = %err, "Error saving product");
        AppError::from(err)
    })?;

    tracing::info!(product_id = product.id, name = %product.name, "product created");
    Ok(ApiResponse::success("Product created", product, Some(Meta::empty())))
}

pub async fn update_product(
    state: &AppState,
    _admin: &AdminSession,
    id: i64,
    payload: UpsertProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let data = payload
        .into_data()
        .ok_or_else(|| AppError::BadRequest(MISSING_PRODUCT_FIELDS.into()))?;
    validate_amounts(data.price, data.stock)?;

    let existing = state.find_product(id).await.ok_or(AppError::NotFound)?;
    let product = state
        .store
        .update_product(existing.doc_id, data)
        .await
        .map_err(|err| {
            tracing::error!(product_id = id, error = %err, "Error saving product");
            AppError::from(err)
        })?;

    tracing::info!(product_id = product.id, "product updated");
    Ok(ApiResponse::success("Product updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    _admin: &AdminSession,
    id: i64,
) -> AppResult<ApiResponse<Removed>> {
    let existing = state
        .find_product(id)
        .await
        .ok_or_else(|| AppError::BadRequest(INVALID_PRODUCT.into()))?;
    state.store.delete_product(existing.doc_id).await.map_err(|err| {
        tracing::error!(product_id = id, error = %err, "Error deleting product");
        AppError::from(err)
    })?;

    tracing::info!(product_id = id, "product deleted");
    Ok(ApiResponse::success(
        "Product deleted successfully",
        Removed { id: id.to_string() },
        Some(Meta::empty()),
    ))
}

pub async fn toggle_visibility(
    state: &AppState,
    _admin: &AdminSession,
    id: i64,
) -> AppResult<ApiResponse<Product>> {
    let mut product = state.find_product(id).await.ok_or(AppError::NotFound)?;
    let visible = !product.visible;
    state
        .store
        .set_visibility(product.doc_id, visible)
        .await
        .map_err(|err| {
            tracing::error!(product_id = id, error = %err, "Error updating visibility");
            AppError::from(err)
        })?;
    product.visible = visible;

    let message = format!(
        "Product is now {}",
        if visible { "visible" } else { "hidden" }
    );
    Ok(ApiResponse::success(message, product, Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    _admin: &AdminSession,
    query: OrderFilter,
) -> AppResult<ApiResponse<OrderList>> {
    let catalog = state.catalog.read().await;
    let items: Vec<Order> = query.apply(&catalog.orders)?.into_iter().cloned().collect();
    let message = if items.is_empty() { "No orders found" } else { "Orders" };
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success(message, OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    _admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = state.find_order(id).await.ok_or(AppError::NotFound)?;
    let data = OrderDetail {
        whatsapp_url: whatsapp_link(&order.phone, &customer_followup(&order)),
        tel_url: tel_link(&order.phone),
        order,
    };
    Ok(ApiResponse::success("Order found", data, Some(Meta::empty())))
}

pub async fn update_order_status(
    state: &AppState,
    _admin: &AdminSession,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let mut order = state.find_order(id).await.ok_or(AppError::NotFound)?;
    state
        .store
        .update_order_status(order.doc_id, payload.status)
        .await?;
    order.status = payload.status;

    tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
    Ok(ApiResponse::success("Order status updated!", order, Some(Meta::empty())))
}

pub async fn delete_order(
    state: &AppState,
    _admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<Removed>> {
    let order = state.find_order(id).await.ok_or(AppError::NotFound)?;
    state.store.delete_order(order.doc_id).await?;
    state.selection.lock().await.remove(&order.id);

    tracing::info!(order_id = %order.id, "order deleted");
    Ok(ApiResponse::success(
        "Order deleted",
        Removed { id: order.id },
        Some(Meta::empty()),
    ))
}

pub async fn toggle_selection(
    state: &AppState,
    _admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<SelectionView>> {
    let mut selection = state.selection.lock().await;
    if !selection.remove(id) {
        selection.insert(id.to_string());
    }
    let selected: Vec<String> = selection.iter().cloned().collect();
    Ok(ApiResponse::success("Selection", SelectionView { selected }, None))
}

/// Ticks or unticks every order in the filtered list; orders outside the
/// filter keep their current state.
pub async fn select_all(
    state: &AppState,
    _admin: &AdminSession,
    payload: SelectAllRequest,
) -> AppResult<ApiResponse<SelectionView>> {
    let query = OrderFilter {
        status: payload.status,
    };
    let catalog = state.catalog.read().await;
    let visible = query.apply(&catalog.orders)?;

    let mut selection = state.selection.lock().await;
    for order in visible {
        if payload.all {
            selection.insert(order.id.clone());
        } else {
            selection.remove(&order.id);
        }
    }
    let selected: Vec<String> = selection.iter().cloned().collect();
    Ok(ApiResponse::success("Selection", SelectionView { selected }, None))
}

pub async fn clear_selection(state: &AppState, _admin: &AdminSession) -> AppResult<ApiResponse<SelectionView>> {
    state.selection.lock().await.clear();
    Ok(ApiResponse::success(
        "Selection cleared",
        SelectionView { selected: Vec::new() },
        None,
    ))
}

/// Deletes the selected orders one by one, skipping ids no longer present.
pub async fn delete_selected(state: &AppState, _admin: &AdminSession) -> AppResult<ApiResponse<SelectionView>> {
    let ids: Vec<String> = state.selection.lock().await.iter().cloned().collect();
    if ids.is_empty() {
        return Err(AppError::BadRequest("No orders selected".into()));
    }

    let orders = state.orders().await;
    for id in &ids {
        let Some(order) = orders.iter().find(|o| &o.id == id) else {
            continue;
        };
        if let Err(err) = state.store.delete_order(order.doc_id).await {
            tracing::error!(order_id = %id, error = %err, "bulk delete stopped");
            return Err(err.into());
        }
        state.selection.lock().await.remove(id);
    }

    state.selection.lock().await.clear();
    tracing::info!(count = ids.len(), "selected orders deleted");
    Ok(ApiResponse::success(
        "Orders deleted",
        SelectionView { selected: Vec::new() },
        Some(Meta::new(ids.len())),
    ))
}

/// Next business id: one past the largest in the snapshot, 1 for an empty
/// catalog.
pub fn next_product_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

fn validate_amounts(price: i64, stock: i32) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if price > MAX_PRICE {
        return Err(AppError::BadRequest(format!("price must not exceed {MAX_PRICE}")));
    }
    if stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }
    Ok(())
}
