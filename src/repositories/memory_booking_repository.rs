//! Store en memoria
//!
//! Implementa el mismo contrato que PostgreSQL para tests y demos. Una
//! unidad de reserva toma el lock exclusivo de los datos hasta que termina,
//! lo que equivale a una transacción serializable.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{NewTrip, PriceSnapshot, Route, RouteStop, Trip};
use crate::repositories::booking_store::{BookingStore, BookingUnit};
use crate::utils::errors::AppResult;

#[derive(Debug, Default)]
pub struct MemoryData {
    pub routes: Vec<Route>,
    pub stops: Vec<RouteStop>,
    pub trips: Vec<Trip>,
}

#[derive(Clone, Default)]
pub struct MemoryBookingRepository {
    data: Arc<Mutex<MemoryData>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_route(&self, route: Route) {
        self.data.lock().await.routes.push(route);
    }

    pub async fn insert_stop(&self, stop: RouteStop) {
        self.data.lock().await.stops.push(stop);
    }

    /// Cambiar el precio de una ruta fuera de banda (como haría un seed nuevo)
    pub async fn set_route_price(&self, route_id: Uuid, base_price_cents: i32) {
        let mut data = self.data.lock().await;
        if let Some(route) = data.routes.iter_mut().find(|r| r.id == route_id) {
            route.base_price_cents = base_price_cents;
        }
    }

    /// Borrar una parada fuera de banda
    pub async fn remove_stop(&self, stop_id: Uuid) {
        self.data.lock().await.stops.retain(|s| s.id != stop_id);
    }

    pub async fn remove_route(&self, route_id: Uuid) {
        self.data.lock().await.routes.retain(|r| r.id != route_id);
    }

    pub async fn trips(&self) -> Vec<Trip> {
        self.data.lock().await.trips.clone()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingRepository {
    async fn list_active_routes(&self) -> AppResult<Vec<Route>> {
        let data = self.data.lock().await;
        let mut routes: Vec<Route> = data.routes.iter().filter(|r| r.is_active).cloned().collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(routes)
    }

    async fn find_route(&self, id: Uuid) -> AppResult<Option<Route>> {
        let data = self.data.lock().await;
        Ok(data.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_active_stops(&self, route_id: Uuid) -> AppResult<Vec<RouteStop>> {
        let data = self.data.lock().await;
        let mut stops: Vec<RouteStop> = data
            .stops
            .iter()
            .filter(|s| s.belongs_to(route_id) && s.is_active)
            .cloned()
            .collect();
        stops.sort_by_key(|s| s.stop_order);
        Ok(stops)
    }

    async fn find_stop(&self, id: Uuid) -> AppResult<Option<RouteStop>> {
        let data = self.data.lock().await;
        Ok(data.stops.iter().find(|s| s.id == id).cloned())
    }

    async fn find_trip(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let data = self.data.lock().await;
        Ok(data.trips.iter().find(|t| t.id == id).cloned())
    }

    async fn begin_booking(&self) -> AppResult<Box<dyn BookingUnit>> {
        let guard = self.data.clone().lock_owned().await;
        Ok(Box::new(MemoryBookingUnit {
            guard,
            staged: Vec::new(),
        }))
    }
}

pub struct MemoryBookingUnit {
    guard: OwnedMutexGuard<MemoryData>,
    staged: Vec<Trip>,
}

#[async_trait]
impl BookingUnit for MemoryBookingUnit {
    async fn route_price(&mut self, route_id: Uuid) -> AppResult<Option<PriceSnapshot>> {
        Ok(self
            .guard
            .routes
            .iter()
            .find(|r| r.id == route_id)
            .map(Route::price_snapshot))
    }

    async fn stop_on_route(&mut self, stop_id: Uuid, route_id: Uuid) -> AppResult<bool> {
        Ok(self
            .guard
            .stops
            .iter()
            .any(|s| s.id == stop_id && s.belongs_to(route_id)))
    }

    async fn insert_trip(&mut self, trip: NewTrip) -> AppResult<Trip> {
        let trip = trip.into_trip();
        self.staged.push(trip.clone());
        Ok(trip)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryBookingUnit { mut guard, staged } = *self;
        guard.trips.extend(staged);
        Ok(())
    }
}
