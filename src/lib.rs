//! Reserva de viajes sobre un catálogo de rutas fijas con paradas ordenadas.
//!
//! Capas: `routes` (axum) -> `controllers` -> `services` / `repositories`.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
