//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del núcleo de reservas
//! y su conversión a respuestas HTTP `{"error": "..."}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Un campo obligatorio no vino en la request
    #[error("{0} es requerido")]
    MissingField(String),

    /// Un valor presente pero fuera de lo permitido (enum, UUID mal formado, JSON inválido)
    #[error("{0}")]
    InvalidValue(String),

    /// Una parada que no existe o no pertenece a la ruta indicada
    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    NotFound(String),

    /// La request superó el tiempo máximo configurado
    #[error("tiempo de espera agotado")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Cuerpo de error para la API
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::InvalidValue(_)
            | AppError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Los errores de almacenamiento se registran pero nunca se filtran al cliente
        let message = match &self {
            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                "error de base de datos".to_string()
            }
            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                "error interno del servidor".to_string()
            }
            other => {
                warn!("⚠️ Request rechazada ({}): {}", status, other);
                other.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidValue(format!("json inválido: {}", rejection.body_text()))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
