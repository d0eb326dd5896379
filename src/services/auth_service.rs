use crate::{
    dto::auth::{LoginRequest, SessionView},
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
    storage::ADMIN_SESSION_KEY,
};

/// Plain comparison against the configured pair; the session is a flag in
/// local storage.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<SessionView>> {
    let admin = &state.config.admin;
    if payload.username != admin.username || payload.password != admin.password {
        tracing::warn!(username = %payload.username, "admin login rejected");
        return Err(AppError::Unauthorized);
    }

    state
        .local
        .set(ADMIN_SESSION_KEY, "true".to_string())
        .await?;
    tracing::info!("admin logged in");

    Ok(ApiResponse::success(
        "Admin login successful!",
        SessionView { logged_in: true },
        None,
    ))
}

pub async fn logout(state: &AppState) -> AppResult<ApiResponse<SessionView>> {
    state.local.remove(ADMIN_SESSION_KEY).await?;
    tracing::info!("admin logged out");
    Ok(ApiResponse::success(
        "Logged out successfully",
        SessionView { logged_in: false },
        None,
    ))
}

pub async fn session(state: &AppState) -> AppResult<ApiResponse<SessionView>> {
    let logged_in = state.is_admin().await?;
    Ok(ApiResponse::success("Session", SessionView { logged_in }, None))
}
