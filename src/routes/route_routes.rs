use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::RouteController;
use crate::dto::RouteDetail;
use crate::models::Route;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
}

async fn list_routes(State(state): State<AppState>) -> AppResult<Json<Vec<Route>>> {
    let controller = RouteController::new(state.store.clone());
    let routes = controller.list_active_routes().await?;
    Ok(Json(routes))
}

async fn get_route(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<RouteDetail>> {
    let Path(id) = id.map_err(|_| AppError::InvalidValue("id de ruta inválido".to_string()))?;
    let controller = RouteController::new(state.store.clone());
    let detail = controller.get_route_detail(id).await?;
    Ok(Json(detail))
}
