use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::database::DatabaseConnection;
use crate::models::{NewTrip, PriceSnapshot, Route, RouteStop, Trip, TripRow, TripStatus};
use crate::repositories::booking_store::{BookingStore, BookingUnit};
use crate::utils::errors::{AppError, AppResult};

const ROUTE_COLUMNS: &str = r#"
    id, name, is_active, origin_name, origin_lat, origin_lon,
    destination_name, destination_lat, destination_lon,
    base_price_cents, currency, created_at, updated_at
"#;

const STOP_COLUMNS: &str = r#"
    id, route_id, name, stop_order, latitude, longitude, is_active, created_at
"#;

const TRIP_COLUMNS: &str = r#"
    id, route_id, passenger_id,
    pickup_stop_id, dropoff_stop_id,
    status, payment_method,
    price_cents, currency,
    scheduled_at, started_at, finished_at, cancelled_at,
    created_at, updated_at
"#;

pub struct PgBookingRepository {
    db: Arc<DatabaseConnection>,
}

impl PgBookingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn list_active_routes(&self) -> AppResult<Vec<Route>> {
        let pool = self.db.pool().await?;
        let routes = sqlx::query_as::<_, Route>(&format!(
            "SELECT {} FROM app.routes WHERE is_active = true ORDER BY created_at DESC",
            ROUTE_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        debug!("📋 {} rutas activas", routes.len());
        Ok(routes)
    }

    async fn find_route(&self, id: Uuid) -> AppResult<Option<Route>> {
        let pool = self.db.pool().await?;
        let route = sqlx::query_as::<_, Route>(&format!(
            "SELECT {} FROM app.routes WHERE id = $1",
            ROUTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(route)
    }

    async fn list_active_stops(&self, route_id: Uuid) -> AppResult<Vec<RouteStop>> {
        let pool = self.db.pool().await?;
        let stops = sqlx::query_as::<_, RouteStop>(&format!(
            "SELECT {} FROM app.route_stops WHERE route_id = $1 AND is_active = true ORDER BY stop_order ASC",
            STOP_COLUMNS
        ))
        .bind(route_id)
        .fetch_all(pool)
        .await?;

        Ok(stops)
    }

    async fn find_stop(&self, id: Uuid) -> AppResult<Option<RouteStop>> {
        let pool = self.db.pool().await?;
        let stop = sqlx::query_as::<_, RouteStop>(&format!(
            "SELECT {} FROM app.route_stops WHERE id = $1",
            STOP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(stop)
    }

    async fn find_trip(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let pool = self.db.pool().await?;
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM app.trips WHERE id = $1",
            TRIP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(Trip::try_from).transpose()
    }

    async fn begin_booking(&self) -> AppResult<Box<dyn BookingUnit>> {
        let pool = self.db.pool().await?;
        let tx = pool.begin().await?;
        Ok(Box::new(PgBookingUnit { tx }))
    }
}

/// Transacción de reserva. Las filas validadas quedan bloqueadas con
/// `FOR SHARE` hasta el commit, así nadie puede borrarlas en el medio.
pub struct PgBookingUnit {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BookingUnit for PgBookingUnit {
    async fn route_price(&mut self, route_id: Uuid) -> AppResult<Option<PriceSnapshot>> {
        let snapshot = sqlx::query_as::<_, PriceSnapshot>(
            r#"
            SELECT base_price_cents AS price_cents, currency
            FROM app.routes
            WHERE id = $1
            FOR SHARE
            "#,
        )
        .bind(route_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(snapshot)
    }

    async fn stop_on_route(&mut self, stop_id: Uuid, route_id: Uuid) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT 1
            FROM app.route_stops
            WHERE id = $1 AND route_id = $2
            FOR SHARE
            "#,
        )
        .bind(stop_id)
        .bind(route_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(found.is_some())
    }

    async fn insert_trip(&mut self, trip: NewTrip) -> AppResult<Trip> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            r#"
            INSERT INTO app.trips (
                id, route_id, passenger_id,
                pickup_stop_id, dropoff_stop_id,
                status, payment_method,
                price_cents, currency,
                scheduled_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(trip.id)
        .bind(trip.route_id)
        .bind(trip.passenger_id)
        .bind(trip.pickup_stop_id)
        .bind(trip.dropoff_stop_id)
        .bind(TripStatus::initial().as_str())
        .bind(trip.payment_method.as_str())
        .bind(trip.price_cents)
        .bind(&trip.currency)
        .bind(trip.scheduled_at)
        .bind(trip.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::Internal(format!("Error creando viaje: {}", e)))?;

        Trip::try_from(row)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let unit = *self;
        unit.tx.commit().await?;
        Ok(())
    }
}
