use auth::LoginOutcome;
use auth::models::LoginCredentials;
use axum::{Json, extract::State};

use crate::{
    error::{ApiJson, ApiResult},
    state::AppState,
};

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<LoginCredentials>,
) -> ApiResult<Json<LoginOutcome>> {
    let outcome = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(outcome))
}
