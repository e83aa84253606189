//! Contrato del colaborador de almacenamiento
//!
//! Todo el núcleo habla con el almacenamiento a través de estos traits, de
//! modo que se pueda inyectar PostgreSQL en producción o un store en memoria
//! en los tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewTrip, PriceSnapshot, Route, RouteStop, Trip};
use crate::utils::errors::AppResult;

/// Lecturas del catálogo y de viajes, más la apertura de unidades de reserva
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Rutas activas, más nuevas primero
    async fn list_active_routes(&self) -> AppResult<Vec<Route>>;

    async fn find_route(&self, id: Uuid) -> AppResult<Option<Route>>;

    /// Paradas activas de una ruta ordenadas por `stop_order` ascendente
    async fn list_active_stops(&self, route_id: Uuid) -> AppResult<Vec<RouteStop>>;

    /// Parada por id, sin importar su ruta ni si está activa
    async fn find_stop(&self, id: Uuid) -> AppResult<Option<RouteStop>>;

    async fn find_trip(&self, id: Uuid) -> AppResult<Option<Trip>>;

    /// Abrir un alcance transaccional para crear un viaje
    async fn begin_booking(&self) -> AppResult<Box<dyn BookingUnit>>;
}

/// Una unidad de trabajo: validaciones de existencia + insert.
///
/// Lo que se valida dentro de la unidad sigue existiendo al hacer commit.
/// Si la unidad se descarta sin `commit` no queda nada persistido.
#[async_trait]
pub trait BookingUnit: Send {
    async fn route_price(&mut self, route_id: Uuid) -> AppResult<Option<PriceSnapshot>>;

    async fn stop_on_route(&mut self, stop_id: Uuid, route_id: Uuid) -> AppResult<bool>;

    async fn insert_trip(&mut self, trip: NewTrip) -> AppResult<Trip>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
