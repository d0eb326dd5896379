use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
};

use crate::{
    dto::{
        admin::DashboardView,
        orders::{OrderDetail, OrderList, SelectAllRequest, SelectionView, UpdateOrderStatusRequest},
        products::{ProductList, UpsertProductRequest},
    },
    error::AppResult,
    filter::{OrderFilter, ProductFilter},
    middleware::auth::AdminSession,
    models::{Order, Product},
    response::{ApiResponse, Removed},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/products", get(list_products).post(create_product))
        .route("/products/low-stock", get(list_low_stock))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/visibility", patch(toggle_visibility))
        .route("/orders", get(list_orders))
        .route("/orders/select-all", post(select_all).delete(clear_selection))
        .route("/orders/selected", delete(delete_selected))
        .route("/orders/{id}", get(get_order).delete(delete_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/orders/{id}/select", post(toggle_selection))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Totals, low-stock products and recent orders", body = ApiResponse<DashboardView>),
        (status = 403, description = "Admin session required"),
    ),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    let resp = admin_service::dashboard(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("q" = Option<String>, Query, description = "Search over name, id and type"),
        ("category" = Option<String>, Query, description = "Product type, or `all`"),
    ),
    responses(
        (status = 200, description = "Filtered product table", body = ApiResponse<ProductList>),
        (status = 403, description = "Admin session required"),
    ),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    admin: AdminSession,
    Query(query): Query<ProductFilter>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/low-stock",
    responses(
        (status = 200, description = "Products at or below the stock threshold", body = ApiResponse<ProductList>),
        (status = 403, description = "Admin session required"),
    ),
    tag = "Admin"
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_low_stock(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Product created with the next id", body = ApiResponse<Product>),
        (status = 400, description = "Required field missing"),
    ),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(payload): Json<UpsertProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::create_product(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Removed>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Removed>>> {
    let resp = admin_service::delete_product(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/visibility",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Visibility flipped", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn toggle_visibility(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::toggle_visibility(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("status" = Option<String>, Query, description = "pending, processing, completed, cancelled or all"),
    ),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<OrderList>),
        (status = 400, description = "Unknown status"),
    ),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminSession,
    Query(query): Query<OrderFilter>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_orders(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id, e.g. ORD123456")
    ),
    responses(
        (status = 200, description = "Order with customer contact links", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = admin_service::get_order(&state, &admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &admin, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order deleted", body = ApiResponse<Removed>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Admin"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Removed>>> {
    let resp = admin_service::delete_order(&state, &admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/select",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Selection toggled", body = ApiResponse<SelectionView>),
    ),
    tag = "Admin"
)]
pub async fn toggle_selection(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SelectionView>>> {
    let resp = admin_service::toggle_selection(&state, &admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/select-all",
    request_body = SelectAllRequest,
    responses(
        (status = 200, description = "Filtered orders selected or cleared", body = ApiResponse<SelectionView>),
    ),
    tag = "Admin"
)]
pub async fn select_all(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(payload): Json<SelectAllRequest>,
) -> AppResult<Json<ApiResponse<SelectionView>>> {
    let resp = admin_service::select_all(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/select-all",
    responses(
        (status = 200, description = "Selection emptied", body = ApiResponse<SelectionView>),
    ),
    tag = "Admin"
)]
pub async fn clear_selection(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<SelectionView>>> {
    let resp = admin_service::clear_selection(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/selected",
    responses(
        (status = 200, description = "Selected orders deleted", body = ApiResponse<SelectionView>),
        (status = 400, description = "Nothing selected"),
    ),
    tag = "Admin"
)]
pub async fn delete_selected(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<SelectionView>>> {
    let resp = admin_service::delete_selected(&state, &admin).await?;
    Ok(Json(resp))
}
