//! Modelo de Trip
//!
//! Este módulo contiene el struct Trip, sus enums cerrados (estado y método
//! de pago) y la fila cruda que se lee de `app.trips`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del viaje.
///
/// Hoy solo `Requested` es alcanzable: no existe ninguna transición
/// implementada. Los otros valores existen para que la tabla de
/// transiciones pueda crecer sin redefinir el tipo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const fn initial() -> Self {
        TripStatus::Requested
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Requested => "requested",
            TripStatus::Confirmed => "confirmed",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Tabla de transiciones permitidas. Vacía por ahora.
    pub fn can_transition_to(&self, _next: TripStatus) -> bool {
        false
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(TripStatus::Requested),
            "confirmed" => Ok(TripStatus::Confirmed),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(AppError::InvalidValue(format!("status inválido: {}", other))),
        }
    }
}

/// Método de pago - solo se registra la etiqueta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Yape,
    Pling,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Pling => "pling",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "yape" => Ok(PaymentMethod::Yape),
            "pling" => Ok(PaymentMethod::Pling),
            _ => Err(AppError::InvalidValue(
                "payment_method inválido (cash, yape, pling)".to_string(),
            )),
        }
    }
}

/// Fila tal como vive en `app.trips` (status y payment_method son TEXT)
#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub id: Uuid,
    pub route_id: Uuid,
    pub passenger_id: Uuid,
    pub pickup_stop_id: Option<Uuid>,
    pub dropoff_stop_id: Option<Uuid>,
    pub status: String,
    pub payment_method: String,
    pub price_cents: i32,
    pub currency: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trip principal - `price_cents`/`currency` son un snapshot de la ruta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub route_id: Uuid,
    pub passenger_id: Uuid,
    pub pickup_stop_id: Option<Uuid>,
    pub dropoff_stop_id: Option<Uuid>,
    pub status: TripStatus,
    pub payment_method: PaymentMethod,
    pub price_cents: i32,
    pub currency: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TripRow> for Trip {
    type Error = AppError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        // Un valor desconocido en la tabla es corrupción de datos, no culpa del cliente
        let status = row.status.parse::<TripStatus>().map_err(|_| {
            AppError::Internal(format!("status desconocido en trip {}: {}", row.id, row.status))
        })?;
        let payment_method = row.payment_method.parse::<PaymentMethod>().map_err(|_| {
            AppError::Internal(format!(
                "payment_method desconocido en trip {}: {}",
                row.id, row.payment_method
            ))
        })?;

        Ok(Trip {
            id: row.id,
            route_id: row.route_id,
            passenger_id: row.passenger_id,
            pickup_stop_id: row.pickup_stop_id,
            dropoff_stop_id: row.dropoff_stop_id,
            status,
            payment_method,
            price_cents: row.price_cents,
            currency: row.currency,
            scheduled_at: row.scheduled_at,
            started_at: row.started_at,
            finished_at: row.finished_at,
            cancelled_at: row.cancelled_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Datos ya validados para insertar un viaje
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub id: Uuid,
    pub route_id: Uuid,
    pub passenger_id: Uuid,
    pub pickup_stop_id: Option<Uuid>,
    pub dropoff_stop_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
    pub price_cents: i32,
    pub currency: String,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewTrip {
    /// Trip tal como queda persistido: estado inicial y timestamps del servidor
    pub fn into_trip(self) -> Trip {
        Trip {
            id: self.id,
            route_id: self.route_id,
            passenger_id: self.passenger_id,
            pickup_stop_id: self.pickup_stop_id,
            dropoff_stop_id: self.dropoff_stop_id,
            status: TripStatus::initial(),
            payment_method: self.payment_method,
            price_cents: self.price_cents,
            currency: self.currency,
            scheduled_at: Some(self.scheduled_at),
            started_at: None,
            finished_at: None,
            cancelled_at: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_requested_is_initial_and_no_transitions_exist() {
        let all = [
            TripStatus::Requested,
            TripStatus::Confirmed,
            TripStatus::Completed,
            TripStatus::Cancelled,
        ];
        assert_eq!(TripStatus::initial(), TripStatus::Requested);
        for from in all {
            for to in all {
                assert!(!from.can_transition_to(to));
            }
        }
        assert!(TripStatus::Cancelled.is_terminal());
        assert!(!TripStatus::Requested.is_terminal());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("yape".parse::<PaymentMethod>().unwrap(), PaymentMethod::Yape);
        assert_eq!("pling".parse::<PaymentMethod>().unwrap(), PaymentMethod::Pling);
        assert!(matches!("CASH".parse::<PaymentMethod>(), Err(AppError::InvalidValue(_))));
        assert!(matches!("card".parse::<PaymentMethod>(), Err(AppError::InvalidValue(_))));
    }

    #[test]
    fn test_row_with_unknown_status_is_internal_error() {
        let now = Utc::now();
        let row = TripRow {
            id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            passenger_id: Uuid::new_v4(),
            pickup_stop_id: None,
            dropoff_stop_id: None,
            status: "boarding".to_string(),
            payment_method: "cash".to_string(),
            price_cents: 500,
            currency: "PEN".to_string(),
            scheduled_at: None,
            started_at: None,
            finished_at: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(Trip::try_from(row), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_trip_serializes_lowercase_enums() {
        let now = Utc::now();
        let trip = NewTrip {
            id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            passenger_id: Uuid::new_v4(),
            pickup_stop_id: None,
            dropoff_stop_id: None,
            payment_method: PaymentMethod::Yape,
            price_cents: 500,
            currency: "PEN".to_string(),
            scheduled_at: now,
            created_at: now,
        }
        .into_trip();

        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(json["status"], "requested");
        assert_eq!(json["payment_method"], "yape");
        assert_eq!(json["price_cents"], 500);
        assert!(json["pickup_stop_id"].is_null());
    }
}
