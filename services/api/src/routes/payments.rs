use axum::{Json, extract::State};

use crate::{
    error::{ApiError, ApiJson, ApiResult},
    models::{CheckoutLink, CheckoutRequest},
    state::AppState,
};

/// Create a hosted checkout for the first installment of a plan
pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> ApiResult<Json<CheckoutLink>> {
    let checkout = request.into_checkout().map_err(ApiError::InvalidInput)?;
    let link = state.payments.create_checkout(&checkout).await?;

    Ok(Json(link))
}
