//! Modelo de Route y RouteStop
//!
//! Mapea exactamente a las tablas `app.routes` y `app.route_stops`.
//! Este núcleo solo las lee: las rutas y paradas se cargan como seed data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Route principal - precio siempre en centavos (unidades menores)
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub origin_name: String,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub destination_name: String,
    pub destination_lat: f64,
    pub destination_lon: f64,
    pub base_price_cents: i32,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parada ordenada de una ruta. `route_id` nunca cambia.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct RouteStop {
    pub id: Uuid,
    pub route_id: Uuid,
    pub name: String,
    pub stop_order: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RouteStop {
    pub fn belongs_to(&self, route_id: Uuid) -> bool {
        self.route_id == route_id
    }
}

/// Precio congelado de una ruta en el momento de la reserva
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PriceSnapshot {
    pub price_cents: i32,
    pub currency: String,
}

impl Route {
    pub fn price_snapshot(&self) -> PriceSnapshot {
        PriceSnapshot {
            price_cents: self.base_price_cents,
            currency: self.currency.clone(),
        }
    }
}
