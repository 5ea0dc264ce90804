use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gasoil_manager::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use gasoil_manager::create_app;
use gasoil_manager::database::DatabaseConnection;
use gasoil_manager::repositories::{FleetStore, InMemoryFleetStore, PgFleetStore};
use gasoil_manager::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gasoil_manager=debug,tower_http=info")),
        )
        .init();

    info!("⛽ Gasoil Manager - Control de consumo de flota");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    let store: Arc<dyn FleetStore> = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(PgFleetStore::new(db_connection.pool().clone()))
        }
        StorageBackend::Memory => {
            warn!("🧪 Almacén en memoria: los datos se pierden al reiniciar");
            Arc::new(InMemoryFleetStore::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles?search= - Listar / filtrar flota");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles/lookup?plate= - Autocompletado por matrícula");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("🛣️ Trayectos:");
    info!("   GET  /api/trips - Historial");
    info!("   POST /api/trips/calculate - Previsualizar consumo");
    info!("   POST /api/trips - Guardar trayecto");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Estadísticas");
    info!("   GET  /api/alerts - Trayectos en Dépassement");
    info!("   GET  /api/notifications - Informe de alertas");
    info!("📄 Exportación:");
    info!("   GET  /api/export/vehicles.csv");
    info!("   GET  /api/export/trips.csv");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de señales: {}", e);
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
