use crate::{
    cart::{Cart, QuantityChange},
    dto::cart::{AddToCartRequest, AdjustQuantityRequest, CartView},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

// Mutations work on a copy of the cart; the live cart is only replaced once
// the copy has been written to local storage.

pub async fn view_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let cart = state.cart.lock().await;
    let meta = Meta::new(cart.len());
    Ok(ApiResponse::success("Cart", CartView::from(&*cart), Some(meta)))
}

pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product = state.find_product(payload.product_id).await;

    let mut cart = state.cart.lock().await;
    let mut next = cart.clone();
    let line = match next.add_line(product.as_ref(), payload.size) {
        Ok(line) => line.clone(),
        Err(err) => {
            tracing::warn!(product_id = payload.product_id, error = %err, "add to cart rejected");
            return Err(err);
        }
    };
    commit(state, &mut cart, next).await?;

    tracing::info!(
        product_id = line.product_id,
        size = %line.size,
        quantity = line.quantity,
        "cart line added"
    );

    Ok(ApiResponse::success(
        format!("{} ({}) added to cart!", line.name, line.size),
        CartView::from(&*cart),
        Some(Meta::new(cart.len())),
    ))
}

pub async fn adjust_quantity(
    state: &AppState,
    index: usize,
    payload: AdjustQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let products = state.products().await;

    let mut cart = state.cart.lock().await;
    let mut next = cart.clone();
    let change = match next.adjust_quantity(index, payload.delta, &products) {
        Ok(change) => change,
        Err(err) => {
            tracing::warn!(index, delta = payload.delta, error = %err, "quantity change rejected");
            return Err(err);
        }
    };
    commit(state, &mut cart, next).await?;

    let message = match change {
        QuantityChange::Updated { quantity, .. } => {
            tracing::debug!(index, quantity, "cart quantity changed");
            "Cart updated"
        }
        QuantityChange::Removed(line) => {
            tracing::info!(product_id = line.product_id, size = %line.size, "cart line removed");
            "Item removed from cart"
        }
    };

    Ok(ApiResponse::success(
        message,
        CartView::from(&*cart),
        Some(Meta::new(cart.len())),
    ))
}

pub async fn remove_from_cart(state: &AppState, index: usize) -> AppResult<ApiResponse<CartView>> {
    let mut cart = state.cart.lock().await;
    let mut next = cart.clone();
    let line = next.remove_line(index)?;
    commit(state, &mut cart, next).await?;

    tracing::info!(product_id = line.product_id, size = %line.size, "cart line removed");

    Ok(ApiResponse::success(
        "Item removed from cart",
        CartView::from(&*cart),
        Some(Meta::new(cart.len())),
    ))
}

async fn commit(state: &AppState, live: &mut Cart, next: Cart) -> AppResult<()> {
    if let Err(err) = state.persist_cart(&next).await {
        tracing::error!(error = %err, "cart not saved, change discarded");
        return Err(err);
    }
    *live = next;
    Ok(())
}
