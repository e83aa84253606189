use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use trip_booking::config::{DatabaseConfig, EnvironmentConfig};
use trip_booking::database::DatabaseConnection;
use trip_booking::repositories::PgBookingRepository;
use trip_booking::routes::create_app_router;
use trip_booking::services::identity::resolver_from_config;
use trip_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    if dotenv().is_err() {
        eprintln!("No se encontró archivo .env, usando variables del sistema");
    }

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚌 Trip Booking API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    if !config.is_development() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se aceptan todos los orígenes");
    }

    // El pool se crea con la primera request que lo necesite
    let db = Arc::new(DatabaseConnection::new(DatabaseConfig::from_env()?));
    let store = Arc::new(PgBookingRepository::new(db.clone()));
    let identity = Arc::from(resolver_from_config(&config));

    if config.identity_mode == trip_booking::config::IdentityMode::Fixed {
        warn!("⚠️ Identidad fija: todos los viajes se registran para {}", config.passenger_id);
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(store, identity, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /routes - Rutas activas");
    info!("   GET  /routes/:id - Detalle de ruta con paradas");
    info!("   POST /trips - Crear viaje");
    info!("   GET  /trips/:id - Detalle de viaje");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    db.close().await;
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
