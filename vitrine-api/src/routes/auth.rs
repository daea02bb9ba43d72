use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use vitrine_auth::{AuthGrant, LoginRequest, RegisterRequest, SessionUser};
use vitrine_shared::{ApiResponse, AppError, AppResult, AuthUser};

use crate::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthGrant>>> {
    let grant = state.auth.login(&req).await?;
    Ok(Json(ApiResponse::ok(grant)))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthGrant>>> {
    let grant = state.auth.register(&req).await?;
    Ok(Json(ApiResponse::ok_with_message(grant, "account created")))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<SessionUser>>> {
    let user = state
        .auth
        .find(auth_user.id)
        .await
        .ok_or_else(|| AppError::unauthorized("account no longer exists"))?;
    Ok(Json(ApiResponse::ok(user)))
}
