//! Resolución de identidad del pasajero
//!
//! La autenticación vive fuera de este servicio. Aquí solo se decide qué
//! passenger_id se graba en el viaje.

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::config::{EnvironmentConfig, IdentityMode};
use crate::utils::errors::{AppError, AppResult};

pub const PASSENGER_HEADER: &str = "x-passenger-id";

pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<Uuid>;
}

/// Siempre devuelve el mismo pasajero configurado
pub struct FixedIdentity {
    passenger_id: Uuid,
}

impl FixedIdentity {
    pub fn new(passenger_id: Uuid) -> Self {
        Self { passenger_id }
    }
}

impl IdentityResolver for FixedIdentity {
    fn resolve(&self, _headers: &HeaderMap) -> AppResult<Uuid> {
        Ok(self.passenger_id)
    }
}

/// Lee el pasajero de un header puesto por un gateway ya autenticado
pub struct HeaderIdentity;

impl IdentityResolver for HeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let raw = headers
            .get(PASSENGER_HEADER)
            .ok_or_else(|| AppError::MissingField(PASSENGER_HEADER.to_string()))?;

        raw.to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or_else(|| AppError::InvalidValue(format!("{} inválido", PASSENGER_HEADER)))
    }
}

/// Construir el resolver que pide la configuración
pub fn resolver_from_config(config: &EnvironmentConfig) -> Box<dyn IdentityResolver> {
    match config.identity_mode {
        IdentityMode::Fixed => Box::new(FixedIdentity::new(config.passenger_id)),
        IdentityMode::Header => Box::new(HeaderIdentity),
    }
}
