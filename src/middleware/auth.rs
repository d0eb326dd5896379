use axum::extract::FromRequestParts;

use crate::{error::AppError, state::AppState};

/// Proof that the admin-session flag was set when the request arrived.
/// Only obtainable through [`ensure_admin`].
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    _private: (),
}

pub async fn ensure_admin(state: &AppState) -> Result<AdminSession, AppError> {
    if state.is_admin().await? {
        Ok(AdminSession { _private: () })
    } else {
        Err(AppError::Forbidden)
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        ensure_admin(state).await
    }
}
