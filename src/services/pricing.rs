//! Snapshot de precio
//!
//! El precio se guarda siempre en centavos enteros. La conversión a unidades
//! mayores solo ocurre al presentar, y es exacta: `Decimal` con escala 2.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::PriceSnapshot;
use crate::repositories::BookingUnit;
use crate::utils::errors::{AppError, AppResult};

/// Leer el precio vigente de la ruta dentro de la unidad de reserva.
///
/// Lo que se persiste en el Trip es este valor, no una referencia a la ruta.
pub async fn snapshot_price(unit: &mut dyn BookingUnit, route_id: Uuid) -> AppResult<PriceSnapshot> {
    unit.route_price(route_id)
        .await?
        .ok_or_else(|| AppError::NotFound("ruta no encontrada".to_string()))
}

/// Centavos -> unidades mayores (500 -> 5.00, 1 -> 0.01)
pub fn cents_to_decimal(cents: i32) -> Decimal {
    Decimal::new(i64::from(cents), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;
    use crate::repositories::{BookingStore, MemoryBookingRepository};
    use chrono::Utc;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn test_cents_to_decimal_examples() {
        assert_eq!(cents_to_decimal(500), Decimal::from_str("5.00").unwrap());
        assert_eq!(cents_to_decimal(1), Decimal::from_str("0.01").unwrap());
        assert_eq!(cents_to_decimal(0), Decimal::ZERO);
        assert_eq!(cents_to_decimal(1250).to_string(), "12.50");
    }

    proptest! {
        #[test]
        fn prop_cents_round_trip_exactly(cents in any::<i32>()) {
            let value = cents_to_decimal(cents);
            prop_assert_eq!(value * Decimal::from(100), Decimal::from(cents));
            prop_assert_eq!(value.scale(), 2);
        }
    }

    #[tokio::test]
    async fn test_snapshot_price_missing_route_is_not_found() {
        let store = MemoryBookingRepository::new();
        let mut unit = store.begin_booking().await.unwrap();

        let result = snapshot_price(unit.as_mut(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_snapshot_price_reads_current_route_price() {
        let store = MemoryBookingRepository::new();
        let now = Utc::now();
        let route = Route {
            id: Uuid::new_v4(),
            name: "Ruta Centro - Norte".to_string(),
            is_active: true,
            origin_name: "Centro".to_string(),
            origin_lat: 0.0,
            origin_lon: 0.0,
            destination_name: "Norte".to_string(),
            destination_lat: 0.0,
            destination_lon: 0.0,
            base_price_cents: 750,
            currency: "PEN".to_string(),
            created_at: now,
            updated_at: now,
        };
        let route_id = route.id;
        store.insert_route(route).await;

        let mut unit = store.begin_booking().await.unwrap();
        let snapshot = snapshot_price(unit.as_mut(), route_id).await.unwrap();
        assert_eq!(snapshot.price_cents, 750);
        assert_eq!(snapshot.currency, "PEN");
    }
}
