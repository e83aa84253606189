//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use uuid::Uuid;

/// Passenger fijo que usa el sistema mientras no exista autenticación real
pub const PLACEHOLDER_PASSENGER_ID: Uuid = Uuid::from_u128(1);

/// Cómo se resuelve la identidad del pasajero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// Siempre el mismo passenger configurado
    Fixed,
    /// Header confiable puesto por el gateway aguas arriba
    Header,
}

impl FromStr for IdentityMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(IdentityMode::Fixed),
            "header" => Ok(IdentityMode::Header),
            other => Err(anyhow!("IDENTITY_MODE inválido: {} (fixed, header)", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub identity_mode: IdentityMode,
    pub passenger_id: Uuid,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            identity_mode: IdentityMode::Fixed,
            passenger_id: PLACEHOLDER_PASSENGER_ID,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde variables de entorno, con defaults para desarrollo local
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: env_or("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            identity_mode: env_or("IDENTITY_MODE", defaults.identity_mode)?,
            passenger_id: env_or("PASSENGER_ID", defaults.passenger_id)?,
            log_level: env_or("LOG_LEVEL", defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leer y parsear una variable, usando `default` si no está definida
pub(crate) fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} inválido ({}): {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_passenger_matches_legacy_id() {
        assert_eq!(
            PLACEHOLDER_PASSENGER_ID.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }

    #[test]
    fn test_identity_mode_parsing() {
        assert_eq!("fixed".parse::<IdentityMode>().unwrap(), IdentityMode::Fixed);
        assert_eq!(" Header ".parse::<IdentityMode>().unwrap(), IdentityMode::Header);
        assert!("jwt".parse::<IdentityMode>().is_err());
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value: u64 = env_or("TRIP_BOOKING_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert!(config.is_development());
    }
}
