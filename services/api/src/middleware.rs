//! Authentication middleware for JWT token validation

use auth::Claims;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// Validate the bearer token and expose its claims to the handlers
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        debug!("Rejected request without a bearer token");
        return Err(ApiError::Unauthorized);
    };

    let claims = state.auth.authenticate(bearer.token())?;

    // Insert the claims into the request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Gate for user administration. Must run after `auth_middleware`.
pub async fn require_superadmin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(ApiError::Unauthorized)?;

    state.auth.authorize_superadmin(claims)?;

    Ok(next.run(req).await)
}
