use crate::{
    dto::{
        contact::{ContactRequest, DeepLink},
        products::{CatalogEntry, CatalogList},
    },
    error::{AppError, AppResult},
    messaging::{contact_message, whatsapp_link},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Storefront listing: visible products only, in store order.
pub async fn list_catalog(state: &AppState) -> AppResult<ApiResponse<CatalogList>> {
    let catalog = state.catalog.read().await;
    let items: Vec<CatalogEntry> = catalog
        .products
        .iter()
        .filter(|p| p.visible)
        .map(CatalogEntry::from)
        .collect();

    let message = if items.is_empty() {
        "No Products Available"
    } else {
        "Products"
    };
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success(message, CatalogList { items }, Some(meta)))
}

pub async fn contact(state: &AppState, payload: ContactRequest) -> AppResult<ApiResponse<DeepLink>> {
    let ContactRequest {
        name,
        phone,
        message,
    } = payload;
    if [&name, &phone, &message].iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::BadRequest("Please fill in all fields".into()));
    }

    let business = &state.config.business;
    let text = contact_message(&business.name, name.trim(), phone.trim(), message.trim());
    Ok(ApiResponse::success(
        "Opening WhatsApp",
        DeepLink {
            whatsapp_url: whatsapp_link(&business.phone, &text),
        },
        None,
    ))
}
