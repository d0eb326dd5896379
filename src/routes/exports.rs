use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    services::export_service::{self, ExportFile},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products.csv", get(products_csv))
        .route("/products.txt", get(products_report))
        .route("/orders.csv", get(orders_csv))
        .route("/orders.txt", get(orders_report))
        .route("/orders.json", get(orders_backup))
        .route("/orders/{id}/receipt", get(receipt))
}

#[utoipa::path(
    get,
    path = "/api/admin/export/products.csv",
    responses(
        (status = 200, description = "Product list as CSV", body = String, content_type = "text/csv"),
        (status = 409, description = "No products to export"),
    ),
    tag = "Export"
)]
pub async fn products_csv(State(state): State<AppState>, admin: AdminSession) -> AppResult<ExportFile> {
    export_service::products_csv(&state, &admin).await
}

#[utoipa::path(
    get,
    path = "/api/admin/export/products.txt",
    responses(
        (status = 200, description = "Titled product table", body = String, content_type = "text/plain"),
        (status = 409, description = "No products to export"),
    ),
    tag = "Export"
)]
pub async fn products_report(State(state): State<AppState>, admin: AdminSession) -> AppResult<ExportFile> {
    export_service::products_report(&state, &admin).await
}

#[utoipa::path(
    get,
    path = "/api/admin/export/orders.csv",
    responses(
        (status = 200, description = "Order history as CSV", body = String, content_type = "text/csv"),
        (status = 409, description = "No orders to export"),
    ),
    tag = "Export"
)]
pub async fn orders_csv(State(state): State<AppState>, admin: AdminSession) -> AppResult<ExportFile> {
    export_service::orders_csv(&state, &admin).await
}

#[utoipa::path(
    get,
    path = "/api/admin/export/orders.txt",
    responses(
        (status = 200, description = "Titled order table", body = String, content_type = "text/plain"),
        (status = 409, description = "No orders to export"),
    ),
    tag = "Export"
)]
pub async fn orders_report(State(state): State<AppState>, admin: AdminSession) -> AppResult<ExportFile> {
    export_service::orders_report(&state, &admin).await
}

#[utoipa::path(
    get,
    path = "/api/admin/export/orders.json",
    responses(
        (status = 200, description = "Pretty-printed backup of every order", body = String, content_type = "application/json"),
        (status = 409, description = "No orders to download"),
    ),
    tag = "Export"
)]
pub async fn orders_backup(State(state): State<AppState>, admin: AdminSession) -> AppResult<ExportFile> {
    export_service::orders_backup(&state, &admin).await
}

#[utoipa::path(
    get,
    path = "/api/admin/export/orders/{id}/receipt",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Plain-text receipt", body = String, content_type = "text/plain"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Export"
)]
pub async fn receipt(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<ExportFile> {
    export_service::receipt(&state, &admin, &id).await
}
