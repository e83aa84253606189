use std::sync::Arc;

use uuid::Uuid;

use crate::dto::{RouteDetail, StopInfo};
use crate::models::Route;
use crate::repositories::BookingStore;
use crate::services::cents_to_decimal;
use crate::utils::errors::{AppError, AppResult};

/// Catálogo de rutas: solo lectura
pub struct RouteController {
    store: Arc<dyn BookingStore>,
}

impl RouteController {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Todas las rutas activas, más nuevas primero, precio en centavos
    pub async fn list_active_routes(&self) -> AppResult<Vec<Route>> {
        self.store.list_active_routes().await
    }

    /// Ruta + paradas activas ordenadas, precio en unidades mayores
    pub async fn get_route_detail(&self, route_id: Uuid) -> AppResult<RouteDetail> {
        let route = self
            .store
            .find_route(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("ruta no encontrada".to_string()))?;

        let stops = self
            .store
            .list_active_stops(route.id)
            .await?
            .into_iter()
            .map(StopInfo::from)
            .collect();

        Ok(RouteDetail {
            id: route.id,
            name: route.name,
            origin: route.origin_name,
            destination: route.destination_name,
            base_price: cents_to_decimal(route.base_price_cents),
            stops,
        })
    }
}
