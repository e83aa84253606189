//! Validación de pertenencia de paradas
//!
//! "La parada no existe" y "la parada es de otra ruta" son el mismo error
//! para el llamador.

use uuid::Uuid;

use crate::repositories::BookingUnit;
use crate::utils::errors::{AppError, AppResult};

/// Verificar que `stop_id` pertenece a `route_id`. `field` solo nombra la
/// parada en el mensaje de error (pickup_stop_id / dropoff_stop_id).
pub async fn validate_membership(
    unit: &mut dyn BookingUnit,
    stop_id: Uuid,
    route_id: Uuid,
    field: &str,
) -> AppResult<()> {
    if unit.stop_on_route(stop_id, route_id).await? {
        Ok(())
    } else {
        Err(AppError::InvalidReference(format!(
            "{} no pertenece a la ruta",
            field
        )))
    }
}
