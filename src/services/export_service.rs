use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    export,
    middleware::auth::AdminSession,
    state::AppState,
};

pub const NO_PRODUCTS: &str = "No products to export";
pub const NO_ORDERS: &str = "No orders to export";
pub const NO_BACKUP: &str = "No orders to download";

const CSV: &str = "text/csv; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";
const JSON: &str = "application/json";

/// A rendered download: served with a content type and an attachment name.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

impl ExportFile {
    fn new(file_name: impl Into<String>, content_type: &'static str, body: String) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            body,
        }
    }
}

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        let disposition = HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(self.content_type)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

pub async fn products_csv(state: &AppState, _admin: &AdminSession) -> AppResult<ExportFile> {
    let products = state.products().await;
    if products.is_empty() {
        return Err(AppError::Warning(NO_PRODUCTS.into()));
    }
    let body = export::products_csv(&products)?;
    tracing::info!(rows = products.len(), "products exported as csv");
    Ok(ExportFile::new(export::PRODUCTS_CSV, CSV, body))
}

pub async fn products_report(state: &AppState, _admin: &AdminSession) -> AppResult<ExportFile> {
    let products = state.products().await;
    if products.is_empty() {
        return Err(AppError::Warning(NO_PRODUCTS.into()));
    }
    let body = export::products_report(&state.config.business.name, &products);
    Ok(ExportFile::new(export::PRODUCTS_REPORT, TEXT, body))
}

pub async fn orders_csv(state: &AppState, _admin: &AdminSession) -> AppResult<ExportFile> {
    let orders = state.orders().await;
    if orders.is_empty() {
        return Err(AppError::Warning(NO_ORDERS.into()));
    }
    let body = export::orders_csv(&orders)?;
    tracing::info!(rows = orders.len(), "orders exported as csv");
    Ok(ExportFile::new(export::ORDERS_CSV, CSV, body))
}

pub async fn orders_report(state: &AppState, _admin: &AdminSession) -> AppResult<ExportFile> {
    let orders = state.orders().await;
    if orders.is_empty() {
        return Err(AppError::Warning(NO_ORDERS.into()));
    }
    let body = export::orders_report(&state.config.business.name, &orders);
    Ok(ExportFile::new(export::ORDERS_REPORT, TEXT, body))
}

pub async fn orders_backup(state: &AppState, _admin: &AdminSession) -> AppResult<ExportFile> {
    let orders = state.orders().await;
    if orders.is_empty() {
        return Err(AppError::Warning(NO_BACKUP.into()));
    }
    let body = export::orders_backup(&orders).map_err(anyhow::Error::from)?;
    let date = Utc::now().format("%Y-%m-%d").to_string();
    Ok(ExportFile::new(export::backup_file_name(&date), JSON, body))
}

pub async fn receipt(state: &AppState, _admin: &AdminSession, id: &str) -> AppResult<ExportFile> {
    let order = state.find_order(id).await.ok_or(AppError::NotFound)?;
    let body = export::receipt(&state.config.business.name, &order);
    Ok(ExportFile::new(export::receipt_file_name(&order), TEXT, body))
}
