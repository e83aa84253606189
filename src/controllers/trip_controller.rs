use std::sync::Arc;

use chrono::{Duration, SubsecRound, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::{CreateTripRequest, RouteInfo, StopInfo, TripDetail};
use crate::models::{NewTrip, PaymentMethod, Trip};
use crate::repositories::BookingStore;
use crate::services::{cents_to_decimal, snapshot_price, validate_membership};
use crate::utils::errors::{AppError, AppResult};

/// Programar para mañana por defecto
const DEFAULT_SCHEDULE_OFFSET_HOURS: i64 = 24;

pub struct TripController {
    store: Arc<dyn BookingStore>,
}

impl TripController {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Crear un viaje.
    ///
    /// Orden de validación (gana el primer fallo): route_id, payment_method
    /// presente, payment_method válido, ruta existente, pickup, dropoff.
    /// Las tres últimas y el insert corren en la misma unidad de reserva.
    pub async fn create_trip(&self, passenger_id: Uuid, request: CreateTripRequest) -> AppResult<Trip> {
        let route_id = request
            .route_id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| AppError::MissingField("route_id".to_string()))?;

        let payment_method: PaymentMethod = request
            .payment_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::MissingField("payment_method".to_string()))?
            .parse()?;

        let mut unit = self.store.begin_booking().await?;

        let price = snapshot_price(unit.as_mut(), route_id).await?;

        if let Some(stop_id) = request.pickup_stop_id {
            validate_membership(unit.as_mut(), stop_id, route_id, "pickup_stop_id").await?;
        }
        if let Some(stop_id) = request.dropoff_stop_id {
            validate_membership(unit.as_mut(), stop_id, route_id, "dropoff_stop_id").await?;
        }

        // Postgres guarda microsegundos; truncar aquí mantiene created_at + 24h exacto
        let now = Utc::now().trunc_subsecs(6);
        let new_trip = NewTrip {
            id: Uuid::new_v4(),
            route_id,
            passenger_id,
            pickup_stop_id: request.pickup_stop_id,
            dropoff_stop_id: request.dropoff_stop_id,
            payment_method,
            price_cents: price.price_cents,
            currency: price.currency,
            scheduled_at: now + Duration::hours(DEFAULT_SCHEDULE_OFFSET_HOURS),
            created_at: now,
        };

        let trip = unit.insert_trip(new_trip).await?;
        unit.commit().await?;

        info!(
            "🎫 Viaje {} creado en ruta {} ({} {} via {})",
            trip.id, trip.route_id, trip.price_cents, trip.currency, trip.payment_method
        );
        Ok(trip)
    }

    /// Detalle de un viaje con su ruta y paradas.
    ///
    /// Viaje y ruta son obligatorios; las paradas se buscan solo por id y
    /// si ya no existen quedan en `None`.
    pub async fn get_trip_detail(&self, trip_id: Uuid) -> AppResult<TripDetail> {
        let trip = self
            .store
            .find_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("viaje no encontrado".to_string()))?;

        let route = self.store.find_route(trip.route_id).await?.ok_or_else(|| {
            AppError::Internal(format!("ruta {} del viaje {} no existe", trip.route_id, trip.id))
        })?;

        let pickup = self.lookup_stop(trip.pickup_stop_id).await?;
        let dropoff = self.lookup_stop(trip.dropoff_stop_id).await?;

        Ok(TripDetail {
            id: trip.id,
            passenger_id: trip.passenger_id,
            route: RouteInfo {
                id: route.id,
                name: route.name,
                origin: route.origin_name,
                destination: route.destination_name,
                base_price: cents_to_decimal(route.base_price_cents),
            },
            pickup,
            dropoff,
            status: trip.status,
            payment_method: trip.payment_method,
            price: cents_to_decimal(trip.price_cents),
            currency: trip.currency,
            scheduled_at: trip.scheduled_at,
            created_at: trip.created_at,
        })
    }

    async fn lookup_stop(&self, stop_id: Option<Uuid>) -> AppResult<Option<StopInfo>> {
        let Some(stop_id) = stop_id else {
            return Ok(None);
        };
        let stop = self.store.find_stop(stop_id).await?;
        if stop.is_none() {
            debug!("⚠️ Parada {} ya no existe, se omite del detalle", stop_id);
        }
        Ok(stop.map(StopInfo::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Route, RouteStop, TripStatus};
    use crate::repositories::MemoryBookingRepository;
    use rust_decimal::Decimal;

    struct Fixture {
        store: MemoryBookingRepository,
        controller: TripController,
        route_id: Uuid,
        stop_id: Uuid,
        other_route_stop_id: Uuid,
    }

    fn route(price: i32) -> Route {
        let now = Utc::now();
        Route {
            id: Uuid::new_v4(),
            name: "Ruta Centro - Norte".to_string(),
            is_active: true,
            origin_name: "Centro".to_string(),
            origin_lat: 0.0,
            origin_lon: 0.0,
            destination_name: "Norte".to_string(),
            destination_lat: 0.0,
            destination_lon: 0.0,
            base_price_cents: price,
            currency: "PEN".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn stop(route_id: Uuid, name: &str) -> RouteStop {
        RouteStop {
            id: Uuid::new_v4(),
            route_id,
            name: name.to_string(),
            stop_order: 1,
            latitude: 0.0,
            longitude: 0.0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    async fn fixture() -> Fixture {
        let store = MemoryBookingRepository::new();
        let r1 = route(500);
        let r2 = route(900);
        let s1 = stop(r1.id, "Parada A");
        let s2 = stop(r2.id, "Parada Z");
        let (route_id, stop_id, other_route_stop_id) = (r1.id, s1.id, s2.id);
        store.insert_route(r1).await;
        store.insert_route(r2).await;
        store.insert_stop(s1).await;
        store.insert_stop(s2).await;

        Fixture {
            controller: TripController::new(Arc::new(store.clone())),
            store,
            route_id,
            stop_id,
            other_route_stop_id,
        }
    }

    fn request(route_id: Option<Uuid>, method: Option<&str>) -> CreateTripRequest {
        CreateTripRequest {
            route_id,
            payment_method: method.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trip_snapshots_price_and_schedules_next_day() {
        let f = fixture().await;
        let passenger = Uuid::new_v4();
        let mut req = request(Some(f.route_id), Some("cash"));
        req.pickup_stop_id = Some(f.stop_id);

        let trip = f.controller.create_trip(passenger, req).await.unwrap();

        assert_eq!(trip.status, TripStatus::Requested);
        assert_eq!(trip.passenger_id, passenger);
        assert_eq!(trip.price_cents, 500);
        assert_eq!(trip.currency, "PEN");
        assert_eq!(trip.pickup_stop_id, Some(f.stop_id));
        assert_eq!(trip.scheduled_at, Some(trip.created_at + Duration::hours(24)));
        assert_eq!(trip.updated_at, trip.created_at);
        assert_eq!(f.store.trips().await, vec![trip]);
    }

    #[tokio::test]
    async fn test_validation_order_first_failure_wins() {
        let f = fixture().await;
        let p = Uuid::new_v4();

        // Sin nada: falta route_id antes que payment_method
        let err = f.controller.create_trip(p, request(None, None)).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref field) if field == "route_id"));

        // UUID nulo cuenta como ausente
        let err = f.controller.create_trip(p, request(Some(Uuid::nil()), Some("cash"))).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref field) if field == "route_id"));

        let err = f.controller.create_trip(p, request(Some(f.route_id), Some(""))).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref field) if field == "payment_method"));

        // Método inválido gana sobre ruta inexistente
        let err = f.controller.create_trip(p, request(Some(Uuid::new_v4()), Some("visa"))).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidValue(_)));

        // Ruta inexistente gana sobre parada inválida
        let mut req = request(Some(Uuid::new_v4()), Some("yape"));
        req.pickup_stop_id = Some(Uuid::new_v4());
        let err = f.controller.create_trip(p, req).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(f.store.trips().await.is_empty());
    }

    #[tokio::test]
    async fn test_stop_from_other_route_is_rejected() {
        let f = fixture().await;
        let mut req = request(Some(f.route_id), Some("pling"));
        req.pickup_stop_id = Some(f.stop_id);
        req.dropoff_stop_id = Some(f.other_route_stop_id);

        let err = f.controller.create_trip(Uuid::new_v4(), req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(ref msg) if msg.contains("dropoff_stop_id")));
        assert!(f.store.trips().await.is_empty());
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_route_price_change() {
        let f = fixture().await;
        let trip = f
            .controller
            .create_trip(Uuid::new_v4(), request(Some(f.route_id), Some("cash")))
            .await
            .unwrap();

        f.store.set_route_price(f.route_id, 1200).await;

        let detail = f.controller.get_trip_detail(trip.id).await.unwrap();
        assert_eq!(detail.price, Decimal::new(500, 2));
        assert_eq!(detail.route.base_price, Decimal::new(1200, 2));
        assert_eq!(f.store.trips().await[0].price_cents, 500);
    }

    #[tokio::test]
    async fn test_trip_detail_tolerates_deleted_stop() {
        let f = fixture().await;
        let mut req = request(Some(f.route_id), Some("cash"));
        req.pickup_stop_id = Some(f.stop_id);
        req.dropoff_stop_id = Some(f.stop_id);
        let trip = f.controller.create_trip(Uuid::new_v4(), req).await.unwrap();

        f.store.remove_stop(f.stop_id).await;

        let detail = f.controller.get_trip_detail(trip.id).await.unwrap();
        assert!(detail.pickup.is_none());
        assert!(detail.dropoff.is_none());
        assert_eq!(detail.route.id, f.route_id);
        assert_eq!(detail.status, TripStatus::Requested);
    }

    #[tokio::test]
    async fn test_trip_detail_missing_trip_and_missing_route() {
        let f = fixture().await;
        let err = f.controller.get_trip_detail(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let trip = f
            .controller
            .create_trip(Uuid::new_v4(), request(Some(f.route_id), Some("cash")))
            .await
            .unwrap();
        f.store.remove_route(f.route_id).await;

        let err = f.controller.get_trip_detail(trip.id).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
