//! Middleware del sistema
//!
//! CORS para la API. La autenticación no vive en este servicio.

pub mod cors;

pub use cors::*;
