//! API service routes

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;
use std::any::Any;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::error;

use crate::{
    config::ServerConfig,
    error::ApiError,
    middleware::{auth_middleware, require_superadmin},
    state::AppState,
};

pub mod health;
pub mod payments;
pub mod session;
pub mod site_config;
pub mod users;
pub mod vehicles;


/// Create the router for the API service
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let user_admin = Router::new()
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", put(users::update_user).delete(users::delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_superadmin,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let protected_routes = Router::new()
        .route("/vehicles/0km", post(vehicles::create_new))
        .route(
            "/vehicles/0km/:id",
            put(vehicles::update_new).delete(vehicles::delete_new),
        )
        .route("/vehicles/usados", post(vehicles::create_used))
        .route(
            "/vehicles/usados/:id",
            put(vehicles::update_used).delete(vehicles::delete_used),
        )
        .route("/migrate-images", post(vehicles::migrate_images))
        .route("/config", post(site_config::update_config))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_router = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(session::login))
        .route("/vehicles/0km", get(vehicles::list_new))
        .route("/vehicles/usados", get(vehicles::list_used))
        .route("/config", get(site_config::get_config))
        .route("/mp/crear-pago", post(payments::create_payment))
        .merge(user_admin)
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(middleware::map_response(timeout_body))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Give the timeout layer's bare 408 the regular JSON error body.
/// Handlers never answer 408 themselves.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

/// Answer a panicking handler with the regular JSON error body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
