use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};

use crate::{
    dto::cart::{AddToCartRequest, AdjustQuantityRequest, CartView},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).post(add_to_cart))
        .route("/{index}", patch(adjust_quantity).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines, total and badge count", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Line added or incremented", body = ApiResponse<CartView>),
        (status = 400, description = "No bag size selected"),
        (status = 409, description = "Out of stock or no more stock available"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_to_cart(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based cart line position")
    ),
    request_body = AdjustQuantityRequest,
    responses(
        (status = 200, description = "Quantity changed or line removed", body = ApiResponse<CartView>),
        (status = 404, description = "No line at index"),
        (status = 409, description = "No more stock available"),
    ),
    tag = "Cart"
)]
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<AdjustQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::adjust_quantity(&state, index, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based cart line position")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "No line at index"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_from_cart(&state, index).await?;
    Ok(Json(resp))
}
