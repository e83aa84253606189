use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::route_dto::StopInfo;
use crate::models::{PaymentMethod, TripStatus};

// Request para crear un viaje. Todo es opcional a nivel de JSON para que
// el workflow pueda reportar qué campo falta en el orden correcto.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTripRequest {
    pub route_id: Option<Uuid>,
    pub pickup_stop_id: Option<Uuid>,
    pub dropoff_stop_id: Option<Uuid>,
    pub payment_method: Option<String>,
}

// Ruta resumida dentro de TripDetail
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
}

// Response de GET /trips/{id}
#[derive(Debug, Serialize)]
pub struct TripDetail {
    pub id: Uuid,
    pub passenger_id: Uuid,
    pub route: RouteInfo,
    pub pickup: Option<StopInfo>,
    pub dropoff: Option<StopInfo>,
    pub status: TripStatus,
    pub payment_method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
