//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay globales: el store y el resolver de
//! identidad se inyectan aquí.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::BookingStore;
use crate::services::IdentityResolver;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub identity: Arc<dyn IdentityResolver>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BookingStore>,
        identity: Arc<dyn IdentityResolver>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            store,
            identity,
            config,
        }
    }
}
