pub mod route_routes;
pub mod trip_routes;

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, routing::get, BoxError, Json, Router};
use serde_json::{json, Value};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::warn;

use crate::middleware::cors::cors_middleware_for;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router completo de la API con sus capas
pub fn create_app_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_middleware_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/routes", route_routes::create_route_router())
        .nest("/trips", trip_routes::create_trip_router())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convertir el vencimiento del timeout en un error con cuerpo JSON.
///
/// Al vencer se descarta el future del handler, y con él cualquier
/// unidad de reserva abierta, que hace rollback.
async fn handle_timeout_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        warn!("⏱️ Request cancelada por timeout");
        AppError::Timeout
    } else {
        AppError::Internal(format!("error en middleware: {}", err))
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
