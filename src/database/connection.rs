//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool, aplica las migraciones y enmascara la URL
//! para los logs.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Pool de conexiones listo para usar
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y aplicar las migraciones pendientes
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;

        run_migrations(&pool).await?;
        info!("✅ Base de datos lista");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            let protocol = &url[..protocol_end];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
