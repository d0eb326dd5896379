use chrono::{DateTime, Utc};

use crate::{
    dto::orders::{CheckoutRequest, CheckoutResponse},
    error::{AppError, AppResult},
    messaging::{order_summary, whatsapp_link},
    models::{NewOrder, OrderStatus},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const EMPTY_CART: &str = "Your cart is empty!";
pub const MISSING_FIELDS: &str = "Please fill all required fields";

/// Persists the cart as an order, then writes the decremented stock of each
/// purchased product one at a time. The stock writes are not transactional:
/// a failure part way leaves earlier writes (and the order) in place.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutResponse>> {
    let cart = state.cart.lock().await.clone();
    if cart.is_empty() {
        tracing::warn!("checkout with empty cart");
        return Err(AppError::BadRequest(EMPTY_CART.into()));
    }

    let required = [
        &payload.customer_name,
        &payload.phone,
        &payload.address,
        &payload.city,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::BadRequest(MISSING_FIELDS.into()));
    }

    let now = Utc::now();
    let new_order = NewOrder {
        id: build_order_id(now),
        customer_name: payload.customer_name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        city: payload.city.trim().to_string(),
        delivery_notes: payload.delivery_notes.trim().to_string(),
        items: cart.lines().to_vec(),
        total: cart.total(),
        date: now.format("%Y-%m-%d").to_string(),
        status: OrderStatus::Pending,
    };

    let order = match state.store.create_order(new_order).await {
        Ok(order) => order,
        Err(err) => {
            tracing::error!(error = %err, "Error placing order");
            return Err(err.into());
        }
    };

    let products = state.products().await;
    for (product_id, purchased) in cart.purchased_quantities() {
        let Some(product) = products.iter().find(|p| p.id == product_id) else {
            continue;
        };
        let stock = (product.stock - purchased).max(0);
        if let Err(err) = state.store.update_stock(product.doc_id, stock).await {
            tracing::error!(
                order_id = %order.id,
                product_id,
                error = %err,
                "stock update failed after order was saved"
            );
            return Err(err.into());
        }
    }

    {
        // Only the placed units leave the cart; lines added meanwhile stay.
        let mut live = state.cart.lock().await;
        let mut next = live.clone();
        next.remove_placed(&cart);
        state.persist_cart(&next).await?;
        *live = next;
    }

    let config = &state.config.business;
    let whatsapp_url = whatsapp_link(&config.phone, &order_summary(&config.name, &order));

    tracing::info!(order_id = %order.id, total = order.total, items = order.items.len(), "order placed");

    Ok(ApiResponse::success(
        format!("Order #{} placed successfully!", order.id),
        CheckoutResponse {
            order,
            whatsapp_url,
        },
        Some(Meta::empty()),
    ))
}

/// `ORD` followed by the last six digits of the epoch milliseconds.
pub fn build_order_id(now: DateTime<Utc>) -> String {
    format!("ORD{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}
