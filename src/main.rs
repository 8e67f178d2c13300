use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use my_list_routes::build_app;
use my_list_routes::config::environment::EnvironmentConfig;
use my_list_routes::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🗺️ My List Routes - API de listas");
    info!("================================");

    let config = EnvironmentConfig::from_env()?;
    let addr: SocketAddr = config.server_url().parse()?;
    let app = build_app(AppState::with_config(config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("📋 Endpoints disponibles (/api/v1):");
    info!("   GET    /lists - Listar listas");
    info!("   POST   /lists - Crear lista");
    info!("   GET    /lists/:id - Obtener lista");
    info!("   PUT    /lists/:id - Actualizar nombre/descripción");
    info!("   DELETE /lists/:id - Eliminar lista");
    info!("   POST   /lists/:id/locations - Agregar ubicación");
    info!("   DELETE /lists/:id/locations/:location_id - Quitar ubicación");
    info!("   PUT    /lists/:id/locations/reorder - Reordenar ubicaciones");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

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
            Ok(mut stream) => {
                stream.recv().await;
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
