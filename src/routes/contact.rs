use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::contact::{ContactRequest, DeepLink},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contact))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "WhatsApp link to the business", body = ApiResponse<DeepLink>),
        (status = 400, description = "Missing field"),
    ),
    tag = "Contact"
)]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<ApiResponse<DeepLink>>> {
    let resp = catalog_service::contact(&state, payload).await?;
    Ok(Json(resp))
}
