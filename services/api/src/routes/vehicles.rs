//! Catalog endpoints for new (0km) and used listings

use axum::{
    Json,
    extract::State,
};
use serde_json::{Value, json};

use crate::{
    error::{ApiJson, ApiPath, ApiResult},
    models::{NewVehicle, NewVehiclePayload, UsedVehicle, UsedVehiclePayload, VehicleKind},
    state::AppState,
};

pub async fn list_new(State(state): State<AppState>) -> ApiResult<Json<Vec<NewVehicle>>> {
    Ok(Json(state.catalog.list_new().await?))
}

pub async fn create_new(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewVehiclePayload>,
) -> ApiResult<Json<Value>> {
    let id = state.catalog.create_new(payload).await?;

    Ok(Json(json!({ "success": true, "id": id })))
}

pub async fn update_new(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<NewVehiclePayload>,
) -> ApiResult<Json<Value>> {
    state.catalog.update_new(id, payload).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn delete_new(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Value>> {
    state.catalog.delete(VehicleKind::New, id).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn list_used(State(state): State<AppState>) -> ApiResult<Json<Vec<UsedVehicle>>> {
    Ok(Json(state.catalog.list_used().await?))
}

pub async fn create_used(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UsedVehiclePayload>,
) -> ApiResult<Json<UsedVehicle>> {
    Ok(Json(state.catalog.create_used(payload).await?))
}

pub async fn update_used(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UsedVehiclePayload>,
) -> ApiResult<Json<Value>> {
    state.catalog.update_used(id, payload).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn delete_used(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Value>> {
    state.catalog.delete(VehicleKind::Used, id).await?;

    Ok(Json(json!({ "success": true })))
}

/// Move inline images still stored in the catalog to the media host
pub async fn migrate_images(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let migrated = state.catalog.migrate_inline_images().await?;

    Ok(Json(json!({ "success": true, "migrated": migrated })))
}
