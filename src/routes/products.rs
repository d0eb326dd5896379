use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::products::CatalogList,
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_catalog))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Visible products with bag-size prices", body = ApiResponse<CatalogList>)
    ),
    tag = "Products"
)]
pub async fn list_catalog(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CatalogList>>> {
    let resp = catalog_service::list_catalog(&state).await?;
    Ok(Json(resp))
}
