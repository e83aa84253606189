//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL `app`.

pub mod route;
pub mod trip;

pub use route::{PriceSnapshot, Route, RouteStop};
pub use trip::{NewTrip, PaymentMethod, Trip, TripRow, TripStatus};
