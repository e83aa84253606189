use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::RouteStop;

// Parada resumida para las respuestas de detalle
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StopInfo {
    pub id: Uuid,
    pub name: String,
}

impl From<RouteStop> for StopInfo {
    fn from(stop: RouteStop) -> Self {
        Self {
            id: stop.id,
            name: stop.name,
        }
    }
}

// Response de GET /routes/{id}
#[derive(Debug, Serialize)]
pub struct RouteDetail {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub stops: Vec<StopInfo>,
}
