use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::{
    error::{ApiJson, ApiResult},
    models::ConfigUpdate,
    state::AppState,
};

pub async fn get_config(State(state): State<AppState>) -> ApiResult<Json<BTreeMap<String, String>>> {
    Ok(Json(state.site_config.get_all().await?))
}

pub async fn update_config(
    State(state): State<AppState>,
    ApiJson(update): ApiJson<ConfigUpdate>,
) -> ApiResult<Json<Value>> {
    state.site_config.set_recognized(&update).await?;

    Ok(Json(json!({ "success": true })))
}
