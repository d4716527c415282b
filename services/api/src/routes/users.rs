//! Staff account administration (superadmin only)

use auth::{Claims, NewUser, PublicUser, UpdateUser};
use axum::{
    Extension, Json,
    extract::State,
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{ApiJson, ApiPath, ApiResult},
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    Ok(Json(state.auth.list_users().await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<Json<PublicUser>> {
    let user = state.auth.create_user(new_user).await?;
    info!("{} created user {}", claims.username, user.username);

    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<UpdateUser>,
) -> ApiResult<Json<Value>> {
    state.auth.update_user(id, update).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Value>> {
    state.auth.delete_user(id).await?;
    info!("{} deleted user {}", claims.username, id);

    Ok(Json(json!({ "success": true })))
}
