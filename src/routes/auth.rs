use axum::{extract::State, response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse, UserResponse},
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = Json<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (token, user) = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = Json<UserResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let id: i64 = claims
        .sub
        .parse()
        .map_err(|_| Error::Authentication("invalid token subject".to_string()))?;
    let user = state
        .auth_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    Ok(Json(UserResponse::from(user)))
}
