use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::TripController;
use crate::dto::{CreateTripRequest, TripDetail};
use crate::models::Trip;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/:id", get(get_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<CreateTripRequest>, JsonRejection>,
) -> AppResult<Json<Trip>> {
    let Json(request) = request?;
    let passenger_id = state.identity.resolve(&headers)?;
    let controller = TripController::new(state.store.clone());
    let trip = controller.create_trip(passenger_id, request).await?;
    Ok(Json(trip))
}

async fn get_trip(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<TripDetail>> {
    let Path(id) = id.map_err(|_| AppError::InvalidValue("id de viaje inválido".to_string()))?;
    let controller = TripController::new(state.store.clone());
    let detail = controller.get_trip_detail(id).await?;
    Ok(Json(detail))
}
